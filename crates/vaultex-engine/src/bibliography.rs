use std::{collections::BTreeSet, path::Path};

use biblatex::Bibliography;

use crate::{
    error::{ConvertError, Result},
    io,
};

/// A parsed `.bib` database.
#[derive(Debug)]
pub struct BibliographyStore {
    entries: Bibliography,
}

impl BibliographyStore {
    pub fn load(path: &Path) -> Result<Self> {
        let source = io::read_path(path)?;
        let entries = Bibliography::parse(&source).map_err(|err| ConvertError::Bibliography {
            path: path.to_path_buf(),
            reason: format!("{err:?}"),
        })?;
        log::debug!("Loaded {} bibliography entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entries for `keys`, or every requested key the store lacks.
    pub fn select(&self, keys: &BTreeSet<String>) -> Result<Bibliography> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| self.entries.get(key).is_none())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ConvertError::MissingCitationKeys(missing));
        }

        let mut selected = Bibliography::new();
        for key in keys {
            if let Some(entry) = self.entries.get(key) {
                selected.insert(entry.clone());
            }
        }
        Ok(selected)
    }
}

/// Serializes entries back to BibTeX, the format the markers point at.
pub fn to_bibtex(entries: &Bibliography) -> String {
    entries.to_bibtex_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_note, create_test_vault};
    use pretty_assertions::assert_eq;

    const BIB: &str = r#"
@article{jones2019,
    author = {Jones, Ann},
    title = {On Things},
    journal = {Journal of Stuff},
    year = {2019},
}

@book{knuth1984,
    author = {Knuth, Donald},
    title = {The TeXbook},
    publisher = {Addison-Wesley},
    year = {1984},
}
"#;

    fn keys(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn selects_requested_entries() {
        let vault = create_test_vault();
        let path = create_test_note(&vault, "refs.bib", BIB);
        let store = BibliographyStore::load(&path).unwrap();
        assert_eq!(store.len(), 2);

        let selected = store.select(&keys(&["knuth1984"])).unwrap();
        assert_eq!(selected.len(), 1);
        assert!(selected.get("knuth1984").is_some());

        let bibtex = to_bibtex(&selected);
        assert!(bibtex.contains("knuth1984"));
        assert!(!bibtex.contains("jones2019"));
    }

    #[test]
    fn missing_keys_are_all_named_in_order() {
        let vault = create_test_vault();
        let path = create_test_note(&vault, "refs.bib", BIB);
        let store = BibliographyStore::load(&path).unwrap();

        let err = store
            .select(&keys(&["zeta", "jones2019", "smith2020"]))
            .unwrap_err();
        let ConvertError::MissingCitationKeys(missing) = err else {
            panic!("expected missing keys, got {err:?}");
        };
        assert_eq!(missing, vec!["smith2020", "zeta"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let vault = create_test_vault();
        let err = BibliographyStore::load(&vault.path().join("none.bib")).unwrap_err();
        assert!(matches!(err, ConvertError::Io(io::IoError::NotFound(_))));
    }
}
