// src/specs/postback.rs
//
// Hidden WebForms state fields. A browser carries these implicitly; a
// transport that posts forms itself must echo them back on every postback.

use crate::config::consts::{FIELD_EVENTVALIDATION, FIELD_VIEWSTATE};
use crate::core::Document;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostbackTokens {
    pub view_state: String,
    /// Absent when event validation is disabled for the page.
    pub event_validation: Option<String>,
}

impl PostbackTokens {
    /// `None` when the page carries no view state at all.
    pub fn from_document(doc: &Document) -> Option<Self> {
        Some(Self {
            view_state: doc.find_field_value(FIELD_VIEWSTATE)?,
            event_validation: doc.find_field_value(FIELD_EVENTVALIDATION),
        })
    }

    /// Form pairs to merge into the next postback body.
    pub fn form_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![(FIELD_VIEWSTATE, self.view_state.as_str())];
        if let Some(ev) = &self.event_validation {
            pairs.push((FIELD_EVENTVALIDATION, ev.as_str()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_both_tokens() {
        let doc = Document::new(
            r#"<input type="hidden" name="__VIEWSTATE" value="vs=="/>
               <input type="hidden" name="__EVENTVALIDATION" value="ev=="/>"#,
        );
        let t = PostbackTokens::from_document(&doc).unwrap();
        assert_eq!(t.view_state, "vs==");
        assert_eq!(t.form_pairs(), vec![("__VIEWSTATE", "vs=="), ("__EVENTVALIDATION", "ev==")]);
    }

    #[test]
    fn event_validation_is_optional() {
        let doc = Document::new(r#"<input type="hidden" name="__VIEWSTATE" value="vs"/>"#);
        let t = PostbackTokens::from_document(&doc).unwrap();
        assert_eq!(t.event_validation, None);
        assert_eq!(t.form_pairs().len(), 1);
    }

    #[test]
    fn no_view_state_no_tokens() {
        assert_eq!(PostbackTokens::from_document(&Document::new("<form></form>")), None);
    }
}
