//! Inline style (`element.style`)

/// Inline style declarations, in the order they were first set
#[derive(Debug, Clone, Default)]
pub struct CssStyleDeclaration {
    properties: Vec<(String, String)>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property; an empty value removes it, as in the DOM
    pub fn set_property(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            self.remove_property(name);
            return;
        }
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some(prop) => prop.1 = value.to_string(),
            None => self.properties.push((name.to_string(), value.to_string())),
        }
    }

    /// Get a property value
    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property, returning the old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let pos = self.properties.iter().position(|(n, _)| n == name)?;
        Some(self.properties.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialized `style` attribute text
    pub fn css_text(&self) -> String {
        self.properties.iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
