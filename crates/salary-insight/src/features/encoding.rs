use std::collections::HashMap;

use super::assembler::FeatureError;

/// Raised when a label is not part of a field's encoding table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{label}' is not a recognised {field} option")]
pub struct UnknownCategoryError {
    pub field: String,
    pub label: String,
}

impl UnknownCategoryError {
    fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
        }
    }
}

/// Single-choice field with a fixed label to integer code table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalField {
    name: String,
    labels: Vec<String>,
    codes: HashMap<String, i64>,
}

impl CategoricalField {
    /// Build a field from a hand-written table. Labels keep the table order.
    pub fn from_table(name: &str, table: &[(&str, i64)]) -> Result<Self, FeatureError> {
        let mut labels = Vec::with_capacity(table.len());
        let mut codes = HashMap::with_capacity(table.len());
        for (label, code) in table {
            if codes.insert(label.to_string(), *code).is_some() {
                return Err(FeatureError::DuplicateLabel {
                    field: name.to_string(),
                    label: label.to_string(),
                });
            }
            labels.push(label.to_string());
        }

        Ok(Self {
            name: name.to_string(),
            labels,
            codes,
        })
    }

    /// Build a label-encoder style field where each label's code is its position.
    pub fn indexed<I, S>(name: &str, labels: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut codes = HashMap::new();
        for (position, label) in labels.into_iter().enumerate() {
            let label = label.into();
            if codes.insert(label.clone(), position as i64).is_some() {
                return Err(FeatureError::DuplicateLabel {
                    field: name.to_string(),
                    label,
                });
            }
            ordered.push(label);
        }

        Ok(Self {
            name: name.to_string(),
            labels: ordered,
            codes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels in the order a form should offer them.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    pub fn encode(&self, label: &str) -> Result<i64, UnknownCategoryError> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| UnknownCategoryError::new(&self.name, label))
    }
}

/// Group of options where each option maps to its own 0/1 column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectField {
    name: String,
    prefix: Option<String>,
    options: Vec<String>,
}

impl MultiSelectField {
    /// Columns are named after the bare option labels.
    pub fn new<I, S>(name: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            prefix: None,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Columns are named `<prefix>_<option>`.
    pub fn with_prefix<I, S>(name: &str, prefix: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: Some(prefix.to_string()),
            ..Self::new(name, options)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn column_name(&self, option: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{option}"),
            None => option.to_string(),
        }
    }

    pub fn columns(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|option| self.column_name(option))
            .collect()
    }

    /// One `(column, flag)` pair per declared option, in declared order.
    pub fn flags<S: AsRef<str>>(
        &self,
        selected: &[S],
    ) -> Result<Vec<(String, bool)>, UnknownCategoryError> {
        if let Some(unknown) = selected
            .iter()
            .map(AsRef::as_ref)
            .find(|label| !self.options.iter().any(|option| option == label))
        {
            return Err(UnknownCategoryError::new(&self.name, unknown));
        }

        Ok(self
            .options
            .iter()
            .map(|option| {
                let chosen = selected.iter().any(|label| label.as_ref() == option);
                (self.column_name(option), chosen)
            })
            .collect())
    }

    /// Declared options that appear in `selected`, in declared order.
    pub fn selected_labels<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| selected.iter().any(|label| label.as_ref() == option.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sex_field() -> CategoricalField {
        CategoricalField::from_table("sex", &[("Male", 0), ("Female", 1)]).expect("table")
    }

    #[test]
    fn encodes_documented_codes() {
        let field = sex_field();
        assert_eq!(field.encode("Male"), Ok(0));
        assert_eq!(field.encode("Female"), Ok(1));
        assert_eq!(field.encode("Female"), Ok(1));
    }

    #[test]
    fn unknown_label_fails_before_inference() {
        let err = sex_field().encode("female").expect_err("labels are case-sensitive");
        assert_eq!(err.field, "sex");
        assert_eq!(err.label, "female");
        assert_eq!(err.to_string(), "'female' is not a recognised sex option");
    }

    #[test]
    fn indexed_field_uses_positions() {
        let field = CategoricalField::indexed("Country", ["Canada", "India", "Japan"])
            .expect("unique labels");
        assert_eq!(field.encode("Canada"), Ok(0));
        assert_eq!(field.encode("Japan"), Ok(2));
        assert_eq!(field.labels(), ["Canada", "India", "Japan"]);
    }

    #[test]
    fn indexed_field_rejects_duplicates() {
        let err = CategoricalField::indexed("Country", ["India", "India"])
            .expect_err("duplicate rejected");
        assert!(matches!(err, FeatureError::DuplicateLabel { label, .. } if label == "India"));
    }

    #[test]
    fn table_field_rejects_duplicates() {
        let err = CategoricalField::from_table("race", &[("White", 0), ("Other", 1), ("White", 2)])
            .expect_err("duplicate rejected");
        assert!(matches!(
            err,
            FeatureError::DuplicateLabel { ref field, ref label } if field == "race" && label == "White"
        ));
    }

    #[test]
    fn prefixed_columns_follow_convention() {
        let field = MultiSelectField::with_prefix("remote", "Remote", ["Remote", "Hybrid"]);
        assert_eq!(field.columns(), ["Remote_Remote", "Remote_Hybrid"]);

        let bare = MultiSelectField::new("languages", ["SQL", "C"]);
        assert_eq!(bare.columns(), ["SQL", "C"]);
    }

    #[test]
    fn flags_follow_declared_order() {
        let field = MultiSelectField::new("languages", ["Python", "SQL", "C"]);
        let flags = field.flags(&["C", "Python"]).expect("known options");
        assert_eq!(
            flags,
            vec![
                ("Python".to_string(), true),
                ("SQL".to_string(), false),
                ("C".to_string(), true),
            ]
        );
        assert_eq!(field.selected_labels(&["C", "Python"]), ["Python", "C"]);
    }

    #[test]
    fn flags_reject_undeclared_option() {
        let field = MultiSelectField::new("languages", ["Python"]);
        let err = field.flags(&["Cobol"]).expect_err("undeclared option");
        assert_eq!(err.field, "languages");
        assert_eq!(err.label, "Cobol");
    }
}
