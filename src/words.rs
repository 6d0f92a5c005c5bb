use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::{Error, Result};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// A bundled practice vocabulary.
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    pub fn load(name: &str) -> Result<Self> {
        let file = WORDS_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::UnknownWordList(name.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::UnknownWordList(name.to_string()))?;

        let list: WordList = serde_json::from_str(contents)?;
        if list.words.is_empty() {
            return Err(Error::EmptyWordList(list.name));
        }
        Ok(list)
    }

    /// Names accepted by [`WordList::load`], sorted.
    pub fn available() -> Vec<String> {
        WORDS_DIR
            .files()
            .filter_map(|f| {
                let path = f.path();
                match path.extension().and_then(|e| e.to_str()) {
                    Some("json") => path.file_stem().and_then(|s| s.to_str()).map(String::from),
                    _ => None,
                }
            })
            .sorted()
            .collect()
    }

    /// Up to `num` distinct words in random order.
    pub fn pick(&self, num: usize) -> Vec<String> {
        self.pick_with(&mut rand::thread_rng(), num)
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R, num: usize) -> Vec<String> {
        self.words.choose_multiple(rng, num).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bundled_lists_load() {
        for name in WordList::available() {
            let list = WordList::load(&name).unwrap();
            assert_eq!(list.name, name);
            assert_eq!(list.size as usize, list.words.len());
        }
    }

    #[test]
    fn available_lists_include_english() {
        let names = WordList::available();
        assert!(names.contains(&"english".to_string()));
        assert!(names.contains(&"tricky".to_string()));
    }

    #[test]
    fn unknown_list_is_an_error() {
        assert_matches!(
            WordList::load("klingon"),
            Err(Error::UnknownWordList(name)) if name == "klingon"
        );
    }

    #[test]
    fn bundled_words_are_already_normalized() {
        let list = WordList::load("english").unwrap();
        for word in &list.words {
            assert_eq!(&crate::alignment::normalize(word), word);
        }
    }

    #[test]
    fn pick_returns_distinct_words() {
        let list = WordList::load("english").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let words = list.pick_with(&mut rng, 10);
        assert_eq!(words.len(), 10);
        assert_eq!(words.iter().unique().count(), 10);
        assert!(words.iter().all(|w| list.words.contains(w)));
    }

    #[test]
    fn pick_caps_at_list_size() {
        let list = WordList {
            name: "tiny".into(),
            size: 2,
            words: vec!["cat".into(), "dog".into()],
        };
        assert_eq!(list.pick(5).len(), 2);
    }

    #[test]
    fn deserializes_word_list_json() {
        let json = r#"{ "name": "test", "size": 2, "words": ["hello", "world"] }"#;
        let list: WordList = serde_json::from_str(json).unwrap();
        assert_eq!(list.name, "test");
        assert_eq!(list.words, vec!["hello", "world"]);
    }
}
