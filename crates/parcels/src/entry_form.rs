//! Entry form state and validation.
//!
//! The egui widgets live in the `ui` crate and only edit the text fields.
//! Everything with rules attached (validation, the busy flag, clearing on
//! success) is here so it can be tested without a window.

use std::fmt;

use bevy::prelude::*;
use rand::Rng;

use crate::record::NewParcel;
use crate::shape;

/// Why a submission was refused before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Block or parcel number is empty.
    MissingIdentifier,
    /// A previous submission is still waiting for the store.
    Busy,
}

impl FormError {
    /// Text shown to the user.
    pub fn notice(&self) -> &'static str {
        match self {
            FormError::MissingIdentifier => "Ada ve Parsel numarası giriniz",
            FormError::Busy => "Önceki kayıt hâlâ gönderiliyor",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingIdentifier => write!(f, "block and parcel number are required"),
            FormError::Busy => write!(f, "a submission is already in flight"),
        }
    }
}

impl std::error::Error for FormError {}

/// Text fields of the parcel entry form plus the in-flight flag.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub ada_no: String,
    pub parsel_no: String,
    pub il: String,
    pub ilce: String,
    pub mahalle: String,
    submitting: bool,
}

impl EntryForm {
    /// True while an insert is outstanding; the submit button is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Check the required fields without touching any state.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.ada_no.trim().is_empty() || self.parsel_no.trim().is_empty() {
            return Err(FormError::MissingIdentifier);
        }
        Ok(())
    }

    /// Validate, attach a generated outline and mark the form busy.
    ///
    /// On `Err` nothing changes and nothing must be sent to the store.
    pub fn begin_submit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<NewParcel, FormError> {
        if self.submitting {
            return Err(FormError::Busy);
        }
        self.validate()?;

        let parcel = NewParcel {
            ada_no: self.ada_no.trim().to_string(),
            parsel_no: self.parsel_no.trim().to_string(),
            il: optional(&self.il),
            ilce: optional(&self.ilce),
            mahalle: optional(&self.mahalle),
            coordinates: Some(shape::generate(rng)),
        };
        self.submitting = true;
        Ok(parcel)
    }

    /// Record the store's answer. Fields are cleared only on success so the
    /// user can retry a failed submission as-is.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.ada_no.clear();
        self.parsel_no.clear();
        self.il.clear();
        self.ilce.clear();
        self.mahalle.clear();
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
