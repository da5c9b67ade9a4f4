use crate::theme::{PreferenceStore, ThemeMode, ThemeSignal};
use log::warn;
use web_sys::{Document, Storage, Window};

/// Theme signal backed by the page stylesheet: custom properties on the
/// document element, with `data-theme` selecting the fallback palette.
pub struct DomTheme {
    window: Window,
    document: Document,
}

impl DomTheme {
    pub const MAIN_COLOR_PROPERTY: &'static str = "--particle-color-main";
    pub const CONNECTION_PROPERTY: &'static str = "--particle-connection-rgb";
    pub const MODE_ATTRIBUTE: &'static str = "data-theme";

    pub fn new(window: Window, document: Document) -> DomTheme {
        DomTheme { window, document }
    }

    fn property(&self, name: &str) -> Option<String> {
        let root = self.document.document_element()?;
        let style = self.window.get_computed_style(&root).ok()??;
        style.get_property_value(name).ok()
    }

    /// Switches the page theme. Stylesheet rules keyed on `data-theme` do
    /// the rest.
    pub fn apply(&self, mode: ThemeMode) {
        if let Some(root) = self.document.document_element() {
            if let Err(e) = root.set_attribute(Self::MODE_ATTRIBUTE, mode.as_str()) {
                warn!("could not set theme attribute: {:?}", e);
            }
        }
    }
}

impl ThemeSignal for DomTheme {
    fn main_color(&self) -> Option<String> {
        self.property(Self::MAIN_COLOR_PROPERTY)
    }

    fn connection_rgb(&self) -> Option<String> {
        self.property(Self::CONNECTION_PROPERTY)
    }

    // Anything but an explicit "dark" counts as light
    fn mode(&self) -> ThemeMode {
        let attribute = self
            .document
            .document_element()
            .and_then(|root| root.get_attribute(Self::MODE_ATTRIBUTE));
        match attribute.as_deref().and_then(ThemeMode::parse) {
            Some(ThemeMode::Dark) => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }
}

/// `localStorage`, when the browser allows it. Without storage the
/// preference lives only for the page.
pub struct LocalStorage(Option<Storage>);

impl LocalStorage {
    pub fn new(window: &Window) -> LocalStorage {
        LocalStorage(window.local_storage().ok().flatten())
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            if let Err(e) = storage.set_item(key, value) {
                warn!("could not persist {}: {:?}", key, e);
            }
        }
    }
}
