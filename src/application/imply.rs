//! Imply use case

use crate::application::tag::{resolve_tag, resolve_value, Resolved};
use crate::domain::{Implication, TagId, TagSpecifier, ValueId};
use crate::error::{Result, TagshelfError};
use crate::infrastructure::{Config, Database, TagStore};

fn resolve_pair<S: TagStore + ?Sized>(
    store: &S,
    specifier: &TagSpecifier,
    config: &Config,
) -> Result<(TagId, Option<ValueId>)> {
    let tag = match resolve_tag(store, &specifier.tag, config.auto_create_tags)? {
        Resolved::Found(tag) => tag,
        Resolved::Unknown => return Err(TagshelfError::TagNotFound(specifier.tag.clone())),
        Resolved::Invalid(reason) => {
            return Err(TagshelfError::InvalidTagName {
                name: specifier.tag.clone(),
                reason,
            })
        }
    };

    let name = specifier.value_name();
    let value = match resolve_value(store, name, config.auto_create_values)? {
        Resolved::Found(value) => value,
        Resolved::Unknown => return Err(TagshelfError::ValueNotFound(name.to_string())),
        Resolved::Invalid(reason) => {
            return Err(TagshelfError::InvalidValueName {
                name: name.to_string(),
                reason,
            })
        }
    };

    Ok((tag.id, value.map(|value| value.id)))
}

/// Record that holding `implying` implies holding `implied`. Returns false
/// when the rule already existed.
pub fn add_implication<S: TagStore + ?Sized>(
    store: &S,
    implying: &TagSpecifier,
    implied: &TagSpecifier,
    config: &Config,
) -> Result<bool> {
    let (tag_id, value_id) = resolve_pair(store, implying, config)?;
    let (implied_tag_id, implied_value_id) = resolve_pair(store, implied, config)?;

    store.insert_implication(&Implication {
        tag_id,
        value_id,
        implied_tag_id,
        implied_value_id,
    })
}

/// Add implications from `implying` to each of `implied` in one transaction.
pub fn imply(
    database: &mut Database,
    config: &Config,
    implying: &TagSpecifier,
    implied: &[TagSpecifier],
) -> Result<usize> {
    if implied.is_empty() {
        return Err(TagshelfError::Usage(
            "at least one implied tag must be specified".to_string(),
        ));
    }

    let tx = database.begin()?;
    let mut added = 0;
    for specifier in implied {
        if add_implication(&tx, implying, specifier, config)? {
            added += 1;
        }
    }
    tx.commit()?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tagging;
    use crate::infrastructure::storage::testing::Fixture;

    #[test]
    fn implication_makes_tagging_implicit() {
        let mut fx = Fixture::new();
        let tx = fx.tx();
        let file = Fixture::file(&tx, "/song.mp3");
        let config = Config::new();

        assert!(add_implication(
            &tx,
            &TagSpecifier::parse("mp3"),
            &TagSpecifier::parse("music"),
            &config
        )
        .unwrap());
        let mp3 = tx.tag_by_name("mp3").unwrap().unwrap();
        let music = tx.tag_by_name("music").unwrap().unwrap();
        Fixture::tag(&tx, file.id, mp3.id, None);

        let implied = Tagging {
            file_id: file.id,
            tag_id: music.id,
            value_id: None,
        };
        assert!(tx.tagging_exists(&implied, true).unwrap());
    }

    #[test]
    fn duplicate_implication_is_not_added_twice() {
        let mut fx = Fixture::new();
        let tx = fx.tx();
        let config = Config::new();
        let from = TagSpecifier::parse("year=2015");
        let to = TagSpecifier::parse("decade=2010s");

        assert!(add_implication(&tx, &from, &to, &config).unwrap());
        assert!(!add_implication(&tx, &from, &to, &config).unwrap());
    }

    #[test]
    fn unknown_tag_is_an_error_without_auto_create() {
        let mut fx = Fixture::new();
        let tx = fx.tx();
        let config = Config {
            auto_create_tags: false,
            ..Config::new()
        };

        let result = add_implication(
            &tx,
            &TagSpecifier::parse("mp3"),
            &TagSpecifier::parse("music"),
            &config,
        );
        assert!(matches!(result, Err(TagshelfError::TagNotFound(name)) if name == "mp3"));
    }

    #[test]
    fn invalid_value_is_rejected() {
        let mut fx = Fixture::new();
        let tx = fx.tx();

        let result = add_implication(
            &tx,
            &TagSpecifier::parse("rating=<5"),
            &TagSpecifier::parse("poor"),
            &Config::new(),
        );
        assert!(matches!(
            result,
            Err(TagshelfError::InvalidValueName { .. })
        ));
        assert_eq!(tx.value_count().unwrap(), 0);
    }
}
