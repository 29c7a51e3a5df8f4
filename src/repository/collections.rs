//! In-memory collections shared by the storage backends

use serde::{Deserialize, Serialize};

use super::traits::{FormPatch, RepoResult};
use crate::error::RepositoryError;
use crate::state::{FormDefinition, FormResponse, NewResponse};

/// The forms and responses collections, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Collections {
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
    #[serde(default)]
    pub responses: Vec<FormResponse>,
}

impl Collections {
    fn form_mut(&mut self, id: &str) -> RepoResult<&mut FormDefinition> {
        self.forms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| RepositoryError::form_not_found(id))
    }

    /// Insert, or overwrite a form stored under the same id
    pub fn create(&mut self, form: &FormDefinition) -> RepoResult<String> {
        form.validate().map_err(RepositoryError::Invalid)?;
        match self.forms.iter_mut().find(|f| f.id == form.id) {
            Some(existing) => *existing = form.clone(),
            None => self.forms.push(form.clone()),
        }
        Ok(form.id.clone())
    }

    pub fn get(&self, id: &str) -> RepoResult<FormDefinition> {
        self.forms
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::form_not_found(id))
    }

    /// Patch a stored form; the stored copy is untouched if the result is invalid
    pub fn update(&mut self, id: &str, patch: FormPatch) -> RepoResult<()> {
        let form = self.form_mut(id)?;
        let mut patched = form.clone();
        patch.apply_to(&mut patched);
        patched.validate().map_err(RepositoryError::Invalid)?;
        *form = patched;
        Ok(())
    }

    /// Remove a form and its responses; returns how many responses went with it
    pub fn delete(&mut self, id: &str) -> RepoResult<usize> {
        let index = self
            .forms
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| RepositoryError::form_not_found(id))?;
        self.forms.remove(index);

        let before = self.responses.len();
        self.responses.retain(|r| r.form_id != id);
        Ok(before - self.responses.len())
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Vec<FormDefinition> {
        let mut forms: Vec<_> = self
            .forms
            .iter()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        forms.sort_by_key(|f| f.created_at);
        forms
    }

    pub fn create_response(&mut self, form_id: &str, response: NewResponse) -> RepoResult<String> {
        if !self.forms.iter().any(|f| f.id == form_id) {
            return Err(RepositoryError::form_not_found(form_id));
        }
        let response = FormResponse::new(form_id, response);
        let id = response.id.clone();
        self.responses.push(response);
        Ok(id)
    }

    /// Unknown form ids simply have no responses
    pub fn list_responses(&self, form_id: &str) -> Vec<FormResponse> {
        self.responses
            .iter()
            .filter(|r| r.form_id == form_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::state::{
        FieldSpec, FieldType, FormDefinitionStore, FormStyle, ResponseData, ResponseValue,
    };

    fn response(value: &str) -> NewResponse {
        let mut data = ResponseData::new();
        data.insert("f".to_string(), ResponseValue::Text(value.to_string()));
        NewResponse {
            data,
            ..Default::default()
        }
    }

    #[test]
    fn test_delete_cascades_only_to_own_responses() {
        let mut c = Collections::default();
        let a = FormDefinition::new("o");
        let b = FormDefinition::new("o");
        c.create(&a).unwrap();
        c.create(&b).unwrap();
        c.create_response(&a.id, response("1")).unwrap();
        c.create_response(&a.id, response("2")).unwrap();
        c.create_response(&b.id, response("3")).unwrap();

        assert_eq!(c.delete(&a.id).unwrap(), 2);
        assert_eq!(c.responses.len(), 1);
        assert_eq!(c.responses[0].form_id, b.id);
    }

    #[test]
    fn test_response_for_missing_form_is_rejected() {
        let mut c = Collections::default();
        let err = c.create_response("ghost", response("x")).unwrap_err();
        assert!(err.is_not_found());
        assert!(c.responses.is_empty());
    }

    #[test]
    fn test_create_with_existing_id_overwrites() {
        let mut c = Collections::default();
        let mut form = FormDefinition::new("o");
        c.create(&form).unwrap();
        form.title = "Second".to_string();
        c.create(&form).unwrap();
        assert_eq!(c.forms.len(), 1);
        assert_eq!(c.get(&form.id).unwrap().title, "Second");
    }

    fn stored_form(c: &mut Collections) -> FormDefinition {
        let mut store = FormDefinitionStore::for_owner("o");
        store
            .add_field(FieldSpec::new("select").label("Plan"))
            .unwrap();
        let form = store.snapshot().unwrap();
        c.create(&form).unwrap();
        form
    }

    fn assert_invalid(result: RepoResult<()>) {
        match result {
            Err(RepositoryError::Invalid(FormError::MalformedRecord(_))) => {}
            other => panic!("expected Invalid(MalformedRecord), got {other:?}"),
        }
    }

    #[test]
    fn test_update_rejects_options_on_text_field() {
        let mut c = Collections::default();
        let form = stored_form(&mut c);
        let mut fields = form.fields.clone();
        fields[0].field_type = FieldType::Text;

        let patch = FormPatch {
            fields: Some(fields),
            ..Default::default()
        };
        assert_invalid(c.update(&form.id, patch));
        assert_eq!(c.get(&form.id).unwrap(), form);
    }

    #[test]
    fn test_update_rejects_duplicate_field_ids() {
        let mut c = Collections::default();
        let form = stored_form(&mut c);
        let fields = vec![form.fields[0].clone(), form.fields[0].clone()];

        let patch = FormPatch {
            fields: Some(fields),
            ..Default::default()
        };
        assert_invalid(c.update(&form.id, patch));
        assert_eq!(c.get(&form.id).unwrap().fields.len(), 1);
    }

    #[test]
    fn test_update_rejects_gradient_with_empty_stop() {
        let mut c = Collections::default();
        let form = stored_form(&mut c);
        let style = FormStyle {
            gradient: true,
            gradient_start: String::new(),
            ..FormStyle::default()
        };

        let patch = FormPatch {
            style: Some(style),
            ..Default::default()
        };
        assert_invalid(c.update(&form.id, patch));
        assert_eq!(c.get(&form.id).unwrap().style, form.style);
    }

    #[test]
    fn test_create_rejects_invalid_record() {
        let mut c = Collections::default();
        let mut form = FormDefinition::new("o");
        form.style.gradient = true;
        form.style.gradient_end = String::new();

        let result = c.create(&form).map(|_| ());
        assert_invalid(result);
        assert!(c.forms.is_empty());
    }
}
