//! Joins the lookup tables into a variable mapping.

use std::collections::HashMap;

use crate::mapping::tables::{TermTable, VariableTable};

/// Resolved variable name → regex fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMapping {
    fragments: HashMap<String, String>,
}

impl VariableMapping {
    /// Fragment for a variable, if it resolved.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.fragments.get(variable).map(String::as_str)
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.fragments.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fragments.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Resolve every variable's term against the term table.
///
/// Variables whose term is unknown are left out of the result.
pub fn build_variable_mapping(terms: &TermTable, variables: &VariableTable) -> VariableMapping {
    let mut fragments = HashMap::with_capacity(variables.len());

    for (variable, term) in variables.iter() {
        match terms.get(term) {
            Some(fragment) => {
                fragments.insert(variable.to_string(), fragment.to_string());
            }
            None => {
                tracing::debug!(variable, term, "Variable references unknown term, skipping");
            }
        }
    }

    tracing::debug!(
        resolved = fragments.len(),
        declared = variables.len(),
        "Variable mapping built"
    );

    VariableMapping { fragments }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_level_indirection() {
        let terms: TermTable = [("HOST", "[A-Za-z0-9-]+"), ("IPV4", r"\d+\.\d+\.\d+\.\d+")]
            .into_iter()
            .collect();
        let variables: VariableTable = [("HOSTNAME", "HOST"), ("NTP_SERVER", "IPV4"), ("SYSLOG", "IPV4")]
            .into_iter()
            .collect();

        let mapping = build_variable_mapping(&terms, &variables);

        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get("HOSTNAME"), Some("[A-Za-z0-9-]+"));
        assert_eq!(mapping.get("NTP_SERVER"), mapping.get("SYSLOG"));
    }

    #[test]
    fn test_dangling_term_is_omitted() {
        let terms: TermTable = [("HOST", "[a-z]+")].into_iter().collect();
        let variables: VariableTable = [("HOSTNAME", "HOST"), ("LOCATION", "SITE_CODE")]
            .into_iter()
            .collect();

        let mapping = build_variable_mapping(&terms, &variables);

        assert!(mapping.contains("HOSTNAME"));
        assert!(!mapping.contains("LOCATION"));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_empty_tables() {
        let mapping = build_variable_mapping(&TermTable::default(), &VariableTable::default());
        assert!(mapping.is_empty());
    }
}
