//! Enumerated field domains.
//!
//! Every enum here is a closed code set: a field typed against one of
//! these domains only ever holds a declared code, and each code has
//! exactly one human-readable label, looked up by code (never the
//! reverse). The serialized form is always the code.

use serde::{Deserialize, Serialize};

/// Common surface of the string-coded domains.
///
/// `Weekday` is the one numeric domain and lives outside this trait.
pub trait CodedEnum: Sized + Copy + 'static {
    /// Every declared value, in declaration order.
    fn all() -> &'static [Self];

    /// The stored code.
    fn code(&self) -> &'static str;

    /// The display label for this code.
    fn label(&self) -> &'static str;

    /// Looks up a declared code; `None` for anything outside the set.
    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.code() == code)
    }
}

macro_rules! coded_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $code)] $variant),+
        }

        impl CodedEnum for $name {
            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

coded_enum! {
    /// ABO/Rh blood group of a patient.
    BloodType {
        APositive => ("A+", "A Positive"),
        ANegative => ("A-", "A Negative"),
        BPositive => ("B+", "B Positive"),
        BNegative => ("B-", "B Negative"),
        AbPositive => ("AB+", "AB Positive"),
        AbNegative => ("AB-", "AB Negative"),
        OPositive => ("O+", "O Positive"),
        ONegative => ("O-", "O Negative"),
    }
}

coded_enum! {
    /// Recorded gender of a patient or doctor.
    Gender {
        Male => ("M", "Male"),
        Female => ("F", "Female"),
        Other => ("O", "Other"),
        NotSpecified => ("N", "Not specified"),
    }
}

coded_enum! {
    /// Lifecycle status of a consultation.
    ///
    /// No transition table is enforced: any status may follow any other.
    /// That looseness is inherited from the system this replaces and is
    /// deliberate; see DESIGN.md.
    ConsultationStatus {
        Pending => ("PENDING", "Pending"),
        Completed => ("COMPLETED", "Completed"),
        Cancelled => ("CANCELLED", "Cancelled"),
    }
}

coded_enum! {
    /// Clinical priority of a consultation.
    Priority {
        Low => ("LOW", "Low"),
        Normal => ("NORMAL", "Normal"),
        High => ("HIGH", "High"),
        Urgent => ("URGENT", "Urgent"),
    }
}

coded_enum! {
    /// Therapeutic category of a medication.
    MedicationCategory {
        Analgesic => ("ANALGESIC", "Analgesic"),
        Antibiotic => ("ANTIBIOTIC", "Antibiotic"),
        Antihistamine => ("ANTIHISTAMINE", "Antihistamine"),
        AntiInflammatory => ("ANTIINFLAMMATORY", "Anti-inflammatory"),
        Antipyretic => ("ANTIPYRETIC", "Antipyretic"),
        Vaccine => ("VACCINE", "Vaccine"),
        Other => ("OTHER", "Other"),
    }
}

coded_enum! {
    /// Route of administration on a prescription line.
    AdministrationRoute {
        Oral => ("ORAL", "Oral"),
        Intravenous => ("INTRAVENOUS", "Intravenous"),
        Intramuscular => ("INTRAMUSCULAR", "Intramuscular"),
        Subcutaneous => ("SUBCUTANEOUS", "Subcutaneous"),
        Topical => ("TOPICAL", "Topical"),
        Inhalation => ("INHALATION", "Inhalation"),
        Ophthalmic => ("OPHTHALMIC", "Ophthalmic"),
    }
}

coded_enum! {
    /// Lifecycle status of a scheduled appointment.
    ///
    /// As with [`ConsultationStatus`], no transition table is enforced.
    AppointmentStatus {
        Scheduled => ("SCHEDULED", "Scheduled"),
        Confirmed => ("CONFIRMED", "Confirmed"),
        Completed => ("COMPLETED", "Completed"),
        Cancelled => ("CANCELLED", "Cancelled"),
        NoShow => ("NO_SHOW", "No show"),
    }
}

coded_enum! {
    /// Coverage tier of an insurance policy.
    CoverageTier {
        Basic => ("BASIC", "Basic"),
        Standard => ("STANDARD", "Standard"),
        Premium => ("PREMIUM", "Premium"),
        Total => ("TOTAL", "Total"),
    }
}

/// Day of the week for a schedule slot. Monday is 1, Sunday is 7.
///
/// The stored code is the number itself, so this domain serializes as an
/// integer rather than a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    pub fn all() -> &'static [Self] {
        &[
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    /// The numeric code, 1..=7.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Looks up a declared numeric code; `None` outside 1..=7.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.code() == code)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::from_code(value)
            .ok_or_else(|| format!("day of week must be 1 (Monday) through 7 (Sunday), got {value}"))
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_codes_round_trip() {
        for blood in BloodType::all() {
            let parsed = BloodType::from_code(blood.code()).expect("declared code resolves");
            assert_eq!(parsed, *blood);
        }
        for status in AppointmentStatus::all() {
            let parsed =
                AppointmentStatus::from_code(status.code()).expect("declared code resolves");
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(BloodType::from_code("C+").is_none());
        assert!(Gender::from_code("X").is_none());
        assert!(ConsultationStatus::from_code("pending").is_none());
        assert!(Weekday::from_code(0).is_none());
        assert!(Weekday::from_code(8).is_none());
    }

    #[test]
    fn each_code_has_exactly_one_label() {
        let labels: Vec<&str> = MedicationCategory::all().iter().map(|c| c.label()).collect();
        let mut deduped = labels.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(labels.len(), deduped.len());
    }

    #[test]
    fn domain_sizes_match_the_declared_sets() {
        assert_eq!(BloodType::all().len(), 8);
        assert_eq!(Gender::all().len(), 4);
        assert_eq!(ConsultationStatus::all().len(), 3);
        assert_eq!(Priority::all().len(), 4);
        assert_eq!(MedicationCategory::all().len(), 7);
        assert_eq!(AdministrationRoute::all().len(), 7);
        assert_eq!(AppointmentStatus::all().len(), 5);
        assert_eq!(CoverageTier::all().len(), 4);
        assert_eq!(Weekday::all().len(), 7);
    }

    #[test]
    fn enums_serialize_as_their_codes() {
        let json = serde_json::to_string(&BloodType::AbNegative).expect("serialize");
        assert_eq!(json, "\"AB-\"");
        let json = serde_json::to_string(&Weekday::Wednesday).expect("serialize");
        assert_eq!(json, "3");

        let back: BloodType = serde_json::from_str("\"O+\"").expect("deserialize");
        assert_eq!(back, BloodType::OPositive);
        let err = serde_json::from_str::<Weekday>("9").expect_err("out of domain");
        assert!(err.to_string().contains("1 (Monday) through 7 (Sunday)"));
    }
}
