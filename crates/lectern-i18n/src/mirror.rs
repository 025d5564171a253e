//! Presentation mirror for the active locale (the document `lang` attribute).

/// Receives the active locale code whenever it is resolved or changes.
pub trait LangMirror {
    /// Reflect `code` onto the host presentation layer.
    fn apply_lang(&self, code: &str);
}

/// Mirror that discards updates, for hosts without a document.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMirror;

impl LangMirror for NoopMirror {
    fn apply_lang(&self, _code: &str) {}
}

impl<F> LangMirror for F
where
    F: Fn(&str),
{
    fn apply_lang(&self, code: &str) {
        self(code);
    }
}

/// Sets `lang` on the document's root element.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentLang;

#[cfg(target_arch = "wasm32")]
impl LangMirror for DocumentLang {
    fn apply_lang(&self, code: &str) {
        let Some(root) = gloo::utils::window()
            .document()
            .and_then(|document| document.document_element())
        else {
            return;
        };
        if let Err(err) = root.set_attribute("lang", code) {
            tracing::warn!(detail = ?err, "failed to set document lang attribute");
        }
    }
}
