//! Virtual bouquet: a small, capped selection from a fixed flower catalogue.

/// Most flowers a bouquet can hold.
pub const MAX_FLOWERS: usize = 5;

/// One entry of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flower {
    /// Stable identifier.
    pub id: u8,
    /// Display name.
    pub name: &'static str,
    /// What the flower says.
    pub meaning: &'static str,
}

/// Flowers on offer.
pub static CATALOGUE: [Flower; 6] = [
    Flower { id: 1, name: "Red Roses", meaning: "Deep Passion" },
    Flower { id: 2, name: "Tulips", meaning: "Perfect Love" },
    Flower { id: 3, name: "Sunflowers", meaning: "Pure Adoration" },
    Flower { id: 4, name: "Lavender", meaning: "Calm Devotion" },
    Flower { id: 5, name: "Orchids", meaning: "Exotic Beauty" },
    Flower { id: 6, name: "Lilies", meaning: "Divine Purity" },
];

/// Look up a catalogue entry.
#[must_use]
pub fn flower(id: u8) -> Option<&'static Flower> {
    CATALOGUE.iter().find(|f| f.id == id)
}

/// Result of toggling a flower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Flower added.
    Added,
    /// Flower removed.
    Removed,
    /// Bouquet already full; nothing changed.
    Full,
    /// Unknown flower id; nothing changed.
    Unknown,
}

/// Selection in pick order, plus whether it has been sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bouquet {
    selected: Vec<u8>,
    sent: bool,
}

impl Bouquet {
    /// Add `id` if absent and there is room, remove it if present.
    pub fn toggle(&mut self, id: u8) -> Toggle {
        if flower(id).is_none() {
            return Toggle::Unknown;
        }
        if let Some(pos) = self.selected.iter().position(|&s| s == id) {
            self.selected.remove(pos);
            return Toggle::Removed;
        }
        if self.selected.len() >= MAX_FLOWERS {
            return Toggle::Full;
        }
        self.selected.push(id);
        Toggle::Added
    }

    /// Whether `id` is part of the bouquet.
    #[must_use]
    pub fn contains(&self, id: u8) -> bool {
        self.selected.contains(&id)
    }

    /// Selected flowers in pick order.
    pub fn flowers(&self) -> impl Iterator<Item = &'static Flower> + '_ {
        self.selected.iter().filter_map(|&id| flower(id))
    }

    /// Number of selected flowers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Mark as delivered. An empty bouquet cannot be sent.
    pub fn send(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.sent = true;
        true
    }

    /// Whether the bouquet was delivered.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        self.sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut bouquet = Bouquet::default();
        assert_eq!(bouquet.toggle(2), Toggle::Added);
        assert!(bouquet.contains(2));
        assert_eq!(bouquet.toggle(2), Toggle::Removed);
        assert!(bouquet.is_empty());
    }

    #[test]
    fn capped_at_five_flowers() {
        let mut bouquet = Bouquet::default();
        for id in 1..=5 {
            assert_eq!(bouquet.toggle(id), Toggle::Added);
        }
        assert_eq!(bouquet.toggle(6), Toggle::Full);
        assert_eq!(bouquet.len(), MAX_FLOWERS);
        assert_eq!(bouquet.toggle(1), Toggle::Removed);
        assert_eq!(bouquet.toggle(6), Toggle::Added);
        let names: Vec<_> = bouquet.flowers().map(|f| f.name).collect();
        assert_eq!(names.last(), Some(&"Lilies"));
    }

    #[test]
    fn unknown_flowers_are_ignored() {
        let mut bouquet = Bouquet::default();
        assert_eq!(bouquet.toggle(0), Toggle::Unknown);
        assert_eq!(bouquet.toggle(42), Toggle::Unknown);
        assert!(bouquet.is_empty());
    }

    #[test]
    fn empty_bouquet_cannot_be_sent() {
        let mut bouquet = Bouquet::default();
        assert!(!bouquet.send());
        bouquet.toggle(1);
        assert!(bouquet.send());
        assert!(bouquet.is_sent());
    }
}
