//! Intake and administrative-update validation.
//!
//! Every rule is checked and every failure is reported, keyed by field, so a
//! resident sees all problems with a submission at once. A field whose value
//! is missing only reports `required`; the remaining rules for that field are
//! skipped. Strings are trimmed first and blank strings count as missing.
//!
//! Fields arrive as raw JSON values so that a number or array where text is
//! expected becomes a field error instead of rejecting the whole body.

use std::borrow::Cow;

use aduan_db::entities::complaint::{ComplaintCategory, ComplaintPriority, ComplaintStatus};
use serde::Deserialize;
use serde_json::Value;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Maximum length, in characters, of the short text fields.
pub const MAX_TEXT_LEN: usize = 255;
/// Minimum length, in characters, of a complaint description.
pub const MIN_DESCRIPTION_LEN: usize = 10;
/// Maximum length, in characters, of a reporter phone number.
pub const MAX_PHONE_LEN: usize = 20;

/// Message catalog, one entry per (field, rule) pair.
pub mod messages {
    pub const TITLE_REQUIRED: &str = "Judul laporan wajib diisi.";
    pub const TITLE_STRING: &str = "Judul laporan harus berupa teks.";
    pub const TITLE_MAX: &str = "Judul laporan maksimal 255 karakter.";
    pub const DESCRIPTION_REQUIRED: &str = "Deskripsi laporan wajib diisi.";
    pub const DESCRIPTION_STRING: &str = "Deskripsi laporan harus berupa teks.";
    pub const DESCRIPTION_MIN: &str = "Deskripsi laporan minimal 10 karakter.";
    pub const LOCATION_REQUIRED: &str = "Lokasi wajib diisi.";
    pub const LOCATION_STRING: &str = "Lokasi harus berupa teks.";
    pub const LOCATION_MAX: &str = "Lokasi maksimal 255 karakter.";
    pub const CATEGORY_REQUIRED: &str = "Kategori infrastruktur wajib dipilih.";
    pub const CATEGORY_IN: &str = "Kategori infrastruktur tidak valid.";
    pub const PRIORITY_REQUIRED: &str = "Prioritas wajib dipilih.";
    pub const PRIORITY_IN: &str = "Prioritas tidak valid.";
    pub const REPORTER_NAME_REQUIRED: &str = "Nama pelapor wajib diisi.";
    pub const REPORTER_NAME_STRING: &str = "Nama pelapor harus berupa teks.";
    pub const REPORTER_NAME_MAX: &str = "Nama pelapor maksimal 255 karakter.";
    pub const REPORTER_EMAIL_REQUIRED: &str = "Email pelapor wajib diisi.";
    pub const REPORTER_EMAIL_EMAIL: &str = "Format email tidak valid.";
    pub const REPORTER_EMAIL_MAX: &str = "Email maksimal 255 karakter.";
    pub const REPORTER_PHONE_STRING: &str = "Nomor telepon harus berupa teks.";
    pub const REPORTER_PHONE_MAX: &str = "Nomor telepon maksimal 20 karakter.";
    pub const STATUS_REQUIRED: &str = "Status wajib dipilih.";
    pub const STATUS_IN: &str = "Status tidak valid.";
    pub const ADMIN_NOTES_STRING: &str = "Catatan admin harus berupa teks.";
}

/// Raw intake fields as submitted by a resident.
///
/// Status, resolution time and administrator notes are not part of intake;
/// unknown fields in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeInput {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default)]
    pub reporter_name: Option<Value>,
    #[serde(default)]
    pub reporter_email: Option<Value>,
    #[serde(default)]
    pub reporter_phone: Option<Value>,
}

/// Intake fields that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidIntake {
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: ComplaintCategory,
    pub priority: ComplaintPriority,
    pub reporter_name: String,
    pub reporter_email: String,
    pub reporter_phone: Option<String>,
}

/// Raw administrative update fields.
///
/// Only these three fields are mutable after intake; anything else in the
/// payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInput {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default)]
    pub admin_notes: Option<Value>,
}

/// Administrative update that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpdate {
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub admin_notes: Option<String>,
}

/// A submitted field after trimming.
enum Raw {
    /// Absent, null or blank.
    Missing,
    Text(String),
    /// Present but not a string.
    NotText,
}

impl Raw {
    fn from_value(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Self::Missing
                } else {
                    Self::Text(trimmed.to_string())
                }
            }
            Some(_) => Self::NotText,
        }
    }
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Collects failures across fields.
#[derive(Default)]
struct Collector {
    errors: ValidationErrors,
}

impl Collector {
    fn fail(&mut self, field: &'static str, code: &'static str, message: &'static str) {
        self.errors.add(field, rule(code, message));
    }

    /// Required text. Reports `required` or `string`.
    fn text(
        &mut self,
        field: &'static str,
        value: Option<Value>,
        required: &'static str,
        not_text: &'static str,
    ) -> Option<String> {
        match Raw::from_value(value) {
            Raw::Text(text) => Some(text),
            Raw::Missing => {
                self.fail(field, "required", required);
                None
            }
            Raw::NotText => {
                self.fail(field, "string", not_text);
                None
            }
        }
    }

    /// Optional text. Missing is fine; anything but a string is not.
    fn optional_text(
        &mut self,
        field: &'static str,
        value: Option<Value>,
        not_text: &'static str,
    ) -> Option<String> {
        match Raw::from_value(value) {
            Raw::Text(text) => Some(text),
            Raw::Missing => None,
            Raw::NotText => {
                self.fail(field, "string", not_text);
                None
            }
        }
    }

    /// Required text with an upper length bound.
    fn bounded_text(
        &mut self,
        field: &'static str,
        value: Option<Value>,
        [required, not_text, too_long]: [&'static str; 3],
    ) -> Option<String> {
        let value = self.text(field, value, required, not_text)?;
        if char_len(&value) > MAX_TEXT_LEN {
            self.fail(field, "max", too_long);
            return None;
        }
        Some(value)
    }

    /// Required value drawn from a closed set. A non-string value is never a
    /// member.
    fn member<T: std::str::FromStr>(
        &mut self,
        field: &'static str,
        value: Option<Value>,
        required: &'static str,
        invalid: &'static str,
    ) -> Option<T> {
        let parsed = match Raw::from_value(value) {
            Raw::Missing => {
                self.fail(field, "required", required);
                return None;
            }
            Raw::Text(text) => text.parse::<T>().ok(),
            Raw::NotText => None,
        };
        if parsed.is_none() {
            self.fail(field, "in", invalid);
        }
        parsed
    }

    /// `value` only stands if no field failed.
    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Validate a resident's submission.
pub fn validate_intake(input: IntakeInput) -> Result<ValidIntake, ValidationErrors> {
    let mut c = Collector::default();

    let title = c.bounded_text(
        "title",
        input.title,
        [
            messages::TITLE_REQUIRED,
            messages::TITLE_STRING,
            messages::TITLE_MAX,
        ],
    );

    let description = c
        .text(
            "description",
            input.description,
            messages::DESCRIPTION_REQUIRED,
            messages::DESCRIPTION_STRING,
        )
        .and_then(|d| {
            if char_len(&d) < MIN_DESCRIPTION_LEN {
                c.fail("description", "min", messages::DESCRIPTION_MIN);
                None
            } else {
                Some(d)
            }
        });

    let location = c.bounded_text(
        "location",
        input.location,
        [
            messages::LOCATION_REQUIRED,
            messages::LOCATION_STRING,
            messages::LOCATION_MAX,
        ],
    );

    let category = c.member::<ComplaintCategory>(
        "category",
        input.category,
        messages::CATEGORY_REQUIRED,
        messages::CATEGORY_IN,
    );

    let priority = c.member::<ComplaintPriority>(
        "priority",
        input.priority,
        messages::PRIORITY_REQUIRED,
        messages::PRIORITY_IN,
    );

    let reporter_name = c.bounded_text(
        "reporter_name",
        input.reporter_name,
        [
            messages::REPORTER_NAME_REQUIRED,
            messages::REPORTER_NAME_STRING,
            messages::REPORTER_NAME_MAX,
        ],
    );

    // Anything but a string fails the email format rule
    let reporter_email = c
        .text(
            "reporter_email",
            input.reporter_email,
            messages::REPORTER_EMAIL_REQUIRED,
            messages::REPORTER_EMAIL_EMAIL,
        )
        .and_then(|email| {
            let mut ok = true;
            if !email.validate_email() {
                c.fail("reporter_email", "email", messages::REPORTER_EMAIL_EMAIL);
                ok = false;
            }
            if char_len(&email) > MAX_TEXT_LEN {
                c.fail("reporter_email", "max", messages::REPORTER_EMAIL_MAX);
                ok = false;
            }
            ok.then_some(email)
        });

    let reporter_phone = c.optional_text(
        "reporter_phone",
        input.reporter_phone,
        messages::REPORTER_PHONE_STRING,
    );
    if reporter_phone
        .as_deref()
        .is_some_and(|phone| char_len(phone) > MAX_PHONE_LEN)
    {
        c.fail("reporter_phone", "max", messages::REPORTER_PHONE_MAX);
    }

    let (
        Some(title),
        Some(description),
        Some(location),
        Some(category),
        Some(priority),
        Some(reporter_name),
        Some(reporter_email),
    ) = (
        title,
        description,
        location,
        category,
        priority,
        reporter_name,
        reporter_email,
    )
    else {
        return Err(c.errors);
    };

    c.finish(ValidIntake {
        title,
        description,
        location,
        category,
        priority,
        reporter_name,
        reporter_email,
        reporter_phone,
    })
}

/// Validate an administrative update.
pub fn validate_update(input: UpdateInput) -> Result<ValidUpdate, ValidationErrors> {
    let mut c = Collector::default();

    let status = c.member::<ComplaintStatus>(
        "status",
        input.status,
        messages::STATUS_REQUIRED,
        messages::STATUS_IN,
    );

    let priority = c.member::<ComplaintPriority>(
        "priority",
        input.priority,
        messages::PRIORITY_REQUIRED,
        messages::PRIORITY_IN,
    );

    let admin_notes = c.optional_text(
        "admin_notes",
        input.admin_notes,
        messages::ADMIN_NOTES_STRING,
    );

    let (Some(status), Some(priority)) = (status, priority) else {
        return Err(c.errors);
    };

    c.finish(ValidUpdate {
        status,
        priority,
        admin_notes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> IntakeInput {
        IntakeInput {
            title: Some("Jalan berlubang di RT 01".into()),
            description: Some(
                "Jalan di RT 01 banyak lubang dan berbahaya untuk dilalui.".into(),
            ),
            location: Some("RT 01, RW 02, Desa Sukamaju".into()),
            category: Some("road".into()),
            priority: Some("high".into()),
            reporter_name: Some("John Doe".into()),
            reporter_email: Some("john@example.com".into()),
            reporter_phone: Some("08123456789".into()),
        }
    }

    fn messages_for(errors: &ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, errs)| {
                errs.iter()
                    .filter_map(|e| e.message.as_ref().map(ToString::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_valid_intake() {
        let valid = validate_intake(valid_input()).unwrap();

        assert_eq!(valid.title, "Jalan berlubang di RT 01");
        assert_eq!(valid.category, ComplaintCategory::Road);
        assert_eq!(valid.priority, ComplaintPriority::High);
        assert_eq!(valid.reporter_phone.as_deref(), Some("08123456789"));
    }

    #[test]
    fn test_every_violation_reported() {
        let input = IntakeInput {
            title: Some("".into()),
            description: Some("short".into()),
            location: Some("".into()),
            category: Some("invalid".into()),
            priority: Some("invalid".into()),
            reporter_name: Some("".into()),
            reporter_email: Some("invalid-email".into()),
            reporter_phone: None,
        };

        let errors = validate_intake(input).unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 7);
        assert_eq!(messages_for(&errors, "title"), [messages::TITLE_REQUIRED]);
        assert_eq!(
            messages_for(&errors, "description"),
            [messages::DESCRIPTION_MIN]
        );
        assert_eq!(messages_for(&errors, "location"), [messages::LOCATION_REQUIRED]);
        assert_eq!(messages_for(&errors, "category"), [messages::CATEGORY_IN]);
        assert_eq!(messages_for(&errors, "priority"), [messages::PRIORITY_IN]);
        assert_eq!(
            messages_for(&errors, "reporter_name"),
            [messages::REPORTER_NAME_REQUIRED]
        );
        assert_eq!(
            messages_for(&errors, "reporter_email"),
            [messages::REPORTER_EMAIL_EMAIL]
        );
    }

    #[test]
    fn test_absent_fields_are_required() {
        let errors = validate_intake(IntakeInput::default()).unwrap_err();

        assert_eq!(messages_for(&errors, "category"), [messages::CATEGORY_REQUIRED]);
        assert_eq!(messages_for(&errors, "priority"), [messages::PRIORITY_REQUIRED]);
        assert_eq!(
            messages_for(&errors, "reporter_email"),
            [messages::REPORTER_EMAIL_REQUIRED]
        );
        assert_eq!(
            messages_for(&errors, "description"),
            [messages::DESCRIPTION_REQUIRED]
        );
        // Phone is optional
        assert!(messages_for(&errors, "reporter_phone").is_empty());
    }

    #[test]
    fn test_missing_and_too_long_title_differ() {
        let mut missing = valid_input();
        missing.title = Some("   ".into());
        let mut too_long = valid_input();
        too_long.title = Some("a".repeat(256).into());

        let missing = messages_for(&validate_intake(missing).unwrap_err(), "title");
        let too_long = messages_for(&validate_intake(too_long).unwrap_err(), "title");

        assert_eq!(missing, [messages::TITLE_REQUIRED]);
        assert_eq!(too_long, [messages::TITLE_MAX]);
    }

    #[test]
    fn test_length_bounds_count_characters() {
        let mut input = valid_input();
        // 255 multi-byte characters is still within bounds
        input.title = Some("é".repeat(255).into());
        input.description = Some("ú".repeat(10).into());
        assert!(validate_intake(input).is_ok());

        let mut input = valid_input();
        input.description = Some("123456789".into());
        let errors = validate_intake(input).unwrap_err();
        assert_eq!(
            messages_for(&errors, "description"),
            [messages::DESCRIPTION_MIN]
        );
    }

    #[test]
    fn test_phone_and_email_limits() {
        let mut input = valid_input();
        input.reporter_phone = Some("0".repeat(21).into());
        input.reporter_email = Some(format!("{}@example.com", "a".repeat(250)).into());

        let errors = validate_intake(input).unwrap_err();

        assert_eq!(
            messages_for(&errors, "reporter_phone"),
            [messages::REPORTER_PHONE_MAX]
        );
        let email = messages_for(&errors, "reporter_email");
        assert!(email.contains(&messages::REPORTER_EMAIL_MAX.to_string()));
    }

    #[test]
    fn test_blank_phone_is_absent() {
        let mut input = valid_input();
        input.reporter_phone = Some("  ".into());

        let valid = validate_intake(input).unwrap();
        assert!(valid.reporter_phone.is_none());
    }

    #[test]
    fn test_non_string_values_are_field_errors() {
        let mut input = valid_input();
        input.title = Some(42.into());
        input.category = Some(5.into());
        input.reporter_email = Some(true.into());
        input.reporter_phone = Some(serde_json::json!(["0812"]));

        let errors = validate_intake(input).unwrap_err();

        assert_eq!(errors.field_errors().len(), 4);
        assert_eq!(messages_for(&errors, "title"), [messages::TITLE_STRING]);
        assert_eq!(messages_for(&errors, "category"), [messages::CATEGORY_IN]);
        assert_eq!(
            messages_for(&errors, "reporter_email"),
            [messages::REPORTER_EMAIL_EMAIL]
        );
        assert_eq!(
            messages_for(&errors, "reporter_phone"),
            [messages::REPORTER_PHONE_STRING]
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut input = valid_input();
        input.title = Some(Value::Null);
        input.reporter_phone = Some(Value::Null);

        let errors = validate_intake(input).unwrap_err();

        assert_eq!(messages_for(&errors, "title"), [messages::TITLE_REQUIRED]);
        assert!(messages_for(&errors, "reporter_phone").is_empty());
    }

    #[test]
    fn test_intake_ignores_lifecycle_fields() {
        let input: IntakeInput = serde_json::from_value(serde_json::json!({
            "title": "Jalan berlubang di RT 01",
            "description": "Jalan di RT 01 banyak lubang dan berbahaya untuk dilalui.",
            "location": "RT 01, RW 02, Desa Sukamaju",
            "category": "road",
            "priority": "high",
            "reporter_name": "John Doe",
            "reporter_email": "john@example.com",
            "status": "resolved",
            "admin_notes": "sudah",
        }))
        .unwrap();

        assert!(validate_intake(input).is_ok());
    }

    #[test]
    fn test_valid_update() {
        let valid = validate_update(UpdateInput {
            status: Some("in_progress".into()),
            priority: Some("high".into()),
            admin_notes: Some("Sedang dalam penanganan oleh tim teknis.".into()),
        })
        .unwrap();

        assert_eq!(valid.status, ComplaintStatus::InProgress);
        assert_eq!(valid.priority, ComplaintPriority::High);
        assert_eq!(
            valid.admin_notes.as_deref(),
            Some("Sedang dalam penanganan oleh tim teknis.")
        );
    }

    #[test]
    fn test_update_rejects_unknown_enums() {
        let errors = validate_update(UpdateInput {
            status: Some("closed".into()),
            priority: Some("critical".into()),
            admin_notes: None,
        })
        .unwrap_err();

        assert_eq!(messages_for(&errors, "status"), [messages::STATUS_IN]);
        assert_eq!(messages_for(&errors, "priority"), [messages::PRIORITY_IN]);
    }

    #[test]
    fn test_update_requires_status_and_priority() {
        let errors = validate_update(UpdateInput::default()).unwrap_err();

        assert_eq!(messages_for(&errors, "status"), [messages::STATUS_REQUIRED]);
        assert_eq!(messages_for(&errors, "priority"), [messages::PRIORITY_REQUIRED]);
    }

    #[test]
    fn test_update_rejects_non_string_values() {
        let errors = validate_update(UpdateInput {
            status: Some(2.into()),
            priority: Some("high".into()),
            admin_notes: Some(serde_json::json!({ "note": "x" })),
        })
        .unwrap_err();

        assert_eq!(messages_for(&errors, "status"), [messages::STATUS_IN]);
        assert_eq!(
            messages_for(&errors, "admin_notes"),
            [messages::ADMIN_NOTES_STRING]
        );
        assert!(messages_for(&errors, "priority").is_empty());
    }
}
