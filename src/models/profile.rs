use serde::{Deserialize, Serialize};

/// The four metrics collected by the risk form.
///
/// Field order matches the wire format expected by `/predict`:
/// `{age, bmi, glucose, insulin}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthProfile {
    pub age: f64,
    pub bmi: f64,
    pub glucose: f64,
    pub insulin: f64,
}

/// Raw form input, exactly as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthForm {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub glucose: String,
    #[serde(default)]
    pub insulin: String,
    #[serde(default)]
    pub bmi: String,
}

/// Which form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Glucose,
    Insulin,
    Bmi,
}

impl ProfileField {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::Age => "age",
            ProfileField::Glucose => "glucose",
            ProfileField::Insulin => "insulin",
            ProfileField::Bmi => "bmi",
        }
    }

    /// Form label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Age => "Usia (tahun)",
            ProfileField::Glucose => "Kadar Glukosa (mg/dL)",
            ProfileField::Insulin => "Insulin (μU/mL)",
            ProfileField::Bmi => "BMI (kg/m²)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ProfileField::Age => "Masukkan usia Anda",
            ProfileField::Glucose => "Masukkan kadar glukosa",
            ProfileField::Insulin => "Masukkan kadar insulin",
            ProfileField::Bmi => "Masukkan BMI Anda",
        }
    }

    /// Display order on the form.
    pub const ALL: [ProfileField; 4] = [
        ProfileField::Age,
        ProfileField::Glucose,
        ProfileField::Insulin,
        ProfileField::Bmi,
    ];
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{} wajib diisi", .0.label())]
    Missing(ProfileField),
    #[error("{} harus berupa angka (diterima: {value:?})", .field.label())]
    NotANumber { field: ProfileField, value: String },
}

impl ProfileError {
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileError::Missing(field) => *field,
            ProfileError::NotANumber { field, .. } => *field,
        }
    }
}

impl HealthForm {
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Age => &self.age,
            ProfileField::Glucose => &self.glucose,
            ProfileField::Insulin => &self.insulin,
            ProfileField::Bmi => &self.bmi,
        }
    }
}

impl From<&HealthProfile> for HealthForm {
    fn from(profile: &HealthProfile) -> Self {
        Self {
            age: profile.age.to_string(),
            glucose: profile.glucose.to_string(),
            insulin: profile.insulin.to_string(),
            bmi: profile.bmi.to_string(),
        }
    }
}

impl HealthProfile {
    /// Parse the raw form into a profile.
    ///
    /// Every field must hold a finite number. Values that would have become
    /// `NaN` in a browser are rejected here, so they never reach the backend.
    pub fn parse_form(form: &HealthForm) -> Result<Self, ProfileError> {
        Ok(Self {
            age: parse_field(ProfileField::Age, &form.age)?,
            bmi: parse_field(ProfileField::Bmi, &form.bmi)?,
            glucose: parse_field(ProfileField::Glucose, &form.glucose)?,
            insulin: parse_field(ProfileField::Insulin, &form.insulin)?,
        })
    }

    /// Reject non-finite values in an already-numeric profile (JSON API path).
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in [
            (ProfileField::Age, self.age),
            (ProfileField::Glucose, self.glucose),
            (ProfileField::Insulin, self.insulin),
            (ProfileField::Bmi, self.bmi),
        ] {
            if !value.is_finite() {
                return Err(ProfileError::NotANumber {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_field(field: ProfileField, raw: &str) -> Result<f64, ProfileError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProfileError::Missing(field));
    }

    let not_a_number = || ProfileError::NotANumber {
        field,
        value: trimmed.to_string(),
    };

    // "27,5" is a decimal comma. A comma followed by exactly three digits
    // reads as a thousands separator ("1,000") and is rejected, as is any
    // mix of comma and dot or more than one comma.
    let normalized = match trimmed.split_once(',') {
        None => trimmed.to_string(),
        Some((whole, fraction))
            if !trimmed.contains('.')
                && !fraction.contains(',')
                && !fraction.is_empty()
                && fraction.len() != 3
                && fraction.bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("{whole}.{fraction}")
        }
        Some(_) => return Err(not_a_number()),
    };
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(not_a_number()),
    }
}
