use super::CardStore;
use crate::error::{Result, ZettelError};
use crate::model::{Card, CardPk};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStore {
    root: PathBuf,
    cards_file: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            cards_file: "cards.json".to_string(),
        }
    }

    pub fn with_cards_file(mut self, name: &str) -> Self {
        self.cards_file = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cards_path(&self) -> PathBuf {
        self.root.join(&self.cards_file)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Card>> {
        let path = self.cards_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let cards: Vec<Card> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), count = cards.len(), "loaded cards");
        Ok(cards)
    }

    fn write(&self, cards: &[Card]) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(cards)?;
        fs::write(self.cards_path(), content)?;
        Ok(())
    }
}

impl CardStore for FileStore {
    fn list_cards(&self) -> Result<Vec<Card>> {
        self.load()
    }

    fn get_card(&self, pk: CardPk) -> Result<Card> {
        self.load()?
            .into_iter()
            .find(|c| c.id == pk)
            .ok_or_else(|| ZettelError::CardNotFound(format!("#{}", pk)))
    }

    fn save_card(&mut self, card: &Card) -> Result<()> {
        let mut cards = self.load()?;
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => cards.push(card.clone()),
        }
        self.write(&cards)
    }

    fn delete_card(&mut self, pk: CardPk) -> Result<()> {
        let mut cards = self.load()?;
        let before = cards.len();
        cards.retain(|c| c.id != pk);
        if cards.len() == before {
            return Err(ZettelError::CardNotFound(format!("#{}", pk)));
        }
        self.write(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_an_empty_collection() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("fresh"));
        assert!(store.list_cards().unwrap().is_empty());
        assert_eq!(store.next_pk().unwrap(), 1);
    }

    #[test]
    fn save_update_and_delete() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf());

        store.save_card(&Card::new(1, "A1", "First")).unwrap();
        store.save_card(&Card::new(2, "B1", "Second")).unwrap();
        store
            .save_card(&Card::new(1, "A1", "First, edited"))
            .unwrap();

        let cards = store.list_cards().unwrap();
        assert_eq!(cards.len(), 2);
        // updates keep the storage position
        assert_eq!(cards[0].title, "First, edited");
        assert_eq!(store.next_pk().unwrap(), 3);

        store.delete_card(1).unwrap();
        assert!(matches!(
            store.get_card(1),
            Err(ZettelError::CardNotFound(_))
        ));
        assert!(store.delete_card(1).is_err());
        assert_eq!(store.get_card(2).unwrap().card_id, "B1");
    }

    #[test]
    fn reads_backend_listing_with_extra_fields() {
        let dir = tempdir().unwrap();
        let json = r#"[
            {"id": 7, "card_id": "SP3", "title": "Root", "body": "", "parent_id": 7, "tags": ["x"]},
            {"id": 8, "card_id": "SP3/1", "title": "Child", "body": "see [SP3]", "parent_id": 7}
        ]"#;
        fs::write(dir.path().join("listing.json"), json).unwrap();

        let mut store = FileStore::new(dir.path().to_path_buf()).with_cards_file("listing.json");
        let cards = store.list_cards().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].explicit_parent(), Some(7));

        store.save_card(&cards[1]).unwrap();
        let raw = fs::read_to_string(store.cards_path()).unwrap();
        assert!(raw.contains("\"tags\""));
    }
}
