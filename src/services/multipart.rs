use crate::models::upload::FilePart;

/// Multipart body: scalar fields plus any number of file parts
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FilePart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    /// Absent values are skipped, never sent as empty strings
    pub fn optional_text(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, name: &str, part: FilePart) -> Self {
        self.files.push((name.to_string(), part));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(_, part)| part.size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_skipped_when_absent() {
        let form = MultipartForm::new()
            .text("patient_id", "p1")
            .optional_text("doctor", None::<String>)
            .optional_text("date", Some("2024-01-01"))
            .file("file", FilePart::new("a.png", "image/png", vec![0; 4]));

        assert_eq!(form.field("patient_id"), Some("p1"));
        assert_eq!(form.field("doctor"), None);
        assert_eq!(form.field("date"), Some("2024-01-01"));
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.total_bytes(), 4);
    }
}
