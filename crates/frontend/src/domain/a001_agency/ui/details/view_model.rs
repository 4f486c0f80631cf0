use contracts::domain::a001_agency::{Agency, AgencyDto};
use contracts::shared::ValidationErrors;
use leptos::prelude::*;

/// Editable agency fields plus load/save state
#[derive(Clone, Copy)]
pub struct AgencyDetailsVm {
    pub agency: RwSignal<Option<Agency>>,

    pub name: RwSignal<String>,
    pub address: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub email: RwSignal<String>,
    pub owner: RwSignal<String>,
    pub tax_code: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub field_errors: RwSignal<ValidationErrors>,
    pub server_errors: RwSignal<Vec<String>>,
    pub is_saving: RwSignal<bool>,
    pub load_error: RwSignal<Option<String>>,
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AgencyDetailsVm {
    pub fn new() -> Self {
        Self {
            agency: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            owner: RwSignal::new(String::new()),
            tax_code: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            field_errors: RwSignal::new(ValidationErrors::new()),
            server_errors: RwSignal::new(Vec::new()),
            is_saving: RwSignal::new(false),
            load_error: RwSignal::new(None),
        }
    }

    /// Copies a loaded agency into the form
    pub fn fill(&self, agency: Agency) {
        let dto = agency.to_dto();
        self.name.set(dto.name);
        self.address.set(dto.address);
        self.phone.set(dto.phone);
        self.email.set(dto.email);
        self.owner.set(dto.owner.unwrap_or_default());
        self.tax_code.set(dto.tax_code.unwrap_or_default());
        self.is_active.set(dto.is_active);
        self.field_errors.set(ValidationErrors::new());
        self.server_errors.set(Vec::new());
        self.agency.set(Some(agency));
    }

    pub fn build_dto(&self) -> AgencyDto {
        AgencyDto {
            name: self.name.get_untracked().trim().to_string(),
            address: self.address.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            owner: optional(self.owner.get_untracked()),
            tax_code: optional(self.tax_code.get_untracked()),
            is_active: self.is_active.get_untracked(),
        }
    }

    /// Inline message for one field
    pub fn error_for(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.field_errors;
        Signal::derive(move || errors.with(|e| e.for_field(field).map(str::to_string)))
    }
}

impl Default for AgencyDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_drops_blank_values() {
        assert_eq!(optional("   ".to_string()), None);
        assert_eq!(optional(" 0301234567 ".to_string()), Some("0301234567".to_string()));
    }
}
