use crate::error::TableError;

/// The 40 hue pages of the Munsell book, in page order.
pub const HUE_PAGE_NAMES: [&str; 40] = [
    "2.5R", "5.0R", "7.5R", "10.0R", "2.5YR", "5.0YR", "7.5YR", "10.0YR", "2.5Y", "5.0Y", "7.5Y",
    "10.0Y", "2.5GY", "5.0GY", "7.5GY", "10.0GY", "2.5G", "5.0G", "7.5G", "10.0G", "2.5BG",
    "5.0BG", "7.5BG", "10.0BG", "2.5B", "5.0B", "7.5B", "10.0B", "2.5PB", "5.0PB", "7.5PB",
    "10.0PB", "2.5P", "5.0P", "7.5P", "10.0P", "2.5RP", "5.0RP", "7.5RP", "10.0RP",
];

/// Ordered catalog of hue page names. A chip's `hue_page_index` is a
/// zero-based position in this list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HueCatalog {
    names: Vec<String>,
}

impl HueCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: u32) -> Option<&str> {
        self.names.get(index as usize).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32)
    }

    /// Resolve an index, failing if it is outside the catalog.
    pub fn check(&self, index: u32) -> Result<&str, TableError> {
        self.name(index).ok_or(TableError::HuePageOutOfRange {
            index,
            len: self.names.len(),
        })
    }

    /// File name used for a rendered hue page, e.g. `03-10.0R.png`.
    pub fn image_file_name(&self, index: u32) -> Result<String, TableError> {
        let name = self.check(index)?;
        Ok(format!("{index:02}-{name}.png"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as u32, n.as_str()))
    }
}

impl Default for HueCatalog {
    fn default() -> Self {
        Self::new(HUE_PAGE_NAMES.iter().map(|s| s.to_string()).collect())
    }
}
