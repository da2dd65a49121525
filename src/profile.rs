//! Artist profile onboarding payloads and the reference catalogs.
//!
//! The onboarding form collects personal, address and professional
//! details and finishes registration with one profiles-table update that
//! also carries the uploaded asset references.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[cfg(feature = "async")]
use crate::uploads::ConsolidatedPayload;

/// The nine provinces the address section selects from.
pub const PROVINCES: [&str; 9] = [
    "Eastern Cape",
    "Free State",
    "Gauteng",
    "KwaZulu-Natal",
    "Limpopo",
    "Mpumalanga",
    "Northern Cape",
    "North West",
    "Western Cape",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter a valid 13-digit South African ID number")]
    InvalidIdNumber,

    #[error("Unknown province: {0}")]
    UnknownProvince(String),
}

/// Onboarding form fields, matching the profiles table columns.
///
/// Dates travel as the form's `YYYY-MM-DD` strings; ids referencing the
/// catalogs stay opaque strings so an empty selection ("Independent")
/// needs no sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingForm {
    pub government_name: String,
    pub artist_name: String,
    pub date_of_birth: String,
    pub sa_id_number: String,
    pub phone_number: String,
    pub street_address: String,
    pub suburb: String,
    pub town_id: String,
    pub province: String,
    pub record_label_id: String,
    pub has_manager: bool,
    pub distributor_id: String,
    pub samro_member: bool,
    pub samro_id: String,
    pub cappasso_member: bool,
    pub cappasso_id: String,
    pub risa_member: bool,
    pub risa_id: String,
    pub sampra_member: bool,
    pub sampra_id: String,
}

impl OnboardingForm {
    /// Field-level checks enforced before the update payload is built.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.sa_id_number.len() != 13
            || !self.sa_id_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ProfileError::InvalidIdNumber);
        }
        if !PROVINCES.contains(&self.province.as_str()) {
            return Err(ProfileError::UnknownProvince(self.province.clone()));
        }
        Ok(())
    }
}

/// The profiles-table update that completes registration: the validated
/// form, the uploaded asset references, and the completion flag.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate<'a> {
    #[serde(flatten)]
    pub form: &'a OnboardingForm,
    pub profile_image_url: Option<&'a str>,
    pub gallery_urls: &'a [String],
    pub demo_urls: &'a [String],
    pub external_links: &'a [String],
    pub registration_complete: bool,
}

#[cfg(feature = "async")]
impl<'a> ProfileUpdate<'a> {
    /// Validates the form and pairs it with the submission results.
    pub fn new(
        form: &'a OnboardingForm,
        assets: &'a ConsolidatedPayload,
    ) -> Result<Self, ProfileError> {
        form.validate()?;
        Ok(Self {
            form,
            profile_image_url: assets.profile_image_ref.as_deref(),
            gallery_urls: &assets.gallery_refs,
            demo_urls: &assets.demo_refs,
            external_links: &assets.external_links,
            registration_complete: true,
        })
    }
}

/// Row in the towns catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    pub id: Uuid,
    pub name: String,
    pub province: String,
}

/// Row in the record label catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLabel {
    pub id: Uuid,
    pub name: String,
}

/// Row in the distributor catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributor {
    pub id: Uuid,
    pub name: String,
}

/// Insert payload for a user-created town.
#[derive(Debug, Clone, Serialize)]
pub struct NewTown<'a> {
    pub name: &'a str,
    pub province: &'a str,
}

/// Insert payload for the name-only catalogs (labels, distributors).
#[derive(Debug, Clone, Serialize)]
pub struct NewCatalogEntry<'a> {
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> OnboardingForm {
        OnboardingForm {
            government_name: "Luyolo Mqini".into(),
            artist_name: "Dlala Luyolo".into(),
            date_of_birth: "1995-06-14".into(),
            sa_id_number: "9506145800087".into(),
            phone_number: "+27 82 000 0000".into(),
            street_address: "12 Long Street".into(),
            suburb: "Gugulethu".into(),
            town_id: "town-1".into(),
            province: "Western Cape".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn test_id_number_must_be_thirteen_digits() {
        let mut form = valid_form();
        form.sa_id_number = "12345".into();
        assert_eq!(form.validate(), Err(ProfileError::InvalidIdNumber));

        form.sa_id_number = "95061458000a7".into();
        assert_eq!(form.validate(), Err(ProfileError::InvalidIdNumber));
    }

    #[test]
    fn test_province_must_be_known() {
        let mut form = valid_form();
        form.province = "Atlantis".into();
        assert_eq!(
            form.validate(),
            Err(ProfileError::UnknownProvince("Atlantis".into()))
        );
    }

    #[test]
    fn test_update_payload_serializes_flat() {
        let form = valid_form();
        let gallery = vec!["https://assets.example/gallery-images/1".to_string()];
        let update = ProfileUpdate {
            form: &form,
            profile_image_url: Some("https://assets.example/profile-images/9"),
            gallery_urls: &gallery,
            demo_urls: &[],
            external_links: &[],
            registration_complete: true,
        };

        let row = serde_json::to_value(&update).expect("payload serializes");
        assert_eq!(row["artist_name"], "Dlala Luyolo");
        assert_eq!(row["registration_complete"], true);
        assert_eq!(
            row["profile_image_url"],
            "https://assets.example/profile-images/9"
        );
        assert_eq!(row["gallery_urls"][0], "https://assets.example/gallery-images/1");
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_update_from_submission_results() {
        let form = valid_form();
        let assets = ConsolidatedPayload {
            profile_image_ref: Some("https://assets.example/profile-images/9".into()),
            gallery_refs: vec![],
            demo_refs: vec!["https://assets.example/demo-songs/7".into()],
            external_links: vec!["https://soundcloud.com/artist".into()],
        };

        let update = ProfileUpdate::new(&form, &assets).expect("valid update");
        assert!(update.registration_complete);
        assert_eq!(update.demo_urls.len(), 1);

        let mut bad_form = valid_form();
        bad_form.sa_id_number = "x".into();
        assert!(ProfileUpdate::new(&bad_form, &assets).is_err());
    }

    #[test]
    fn test_catalog_insert_payloads() {
        let town = NewTown {
            name: "Qonce",
            province: "Eastern Cape",
        };
        let row = serde_json::to_value(&town).expect("town serializes");
        assert_eq!(row, serde_json::json!({"name": "Qonce", "province": "Eastern Cape"}));

        let label = NewCatalogEntry { name: "Ilitha Records" };
        let row = serde_json::to_value(&label).expect("label serializes");
        assert_eq!(row, serde_json::json!({"name": "Ilitha Records"}));
    }
}
