// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Playwright bridge
//
// Page::on_dialog handlers can not be removed, so one permanent handler per
// page forwards every dialog into a DialogHub. The hub provides the one-shot,
// unsubscribable listeners the arbiter needs. Dialogs nobody claims are
// dismissed, matching Playwright's behavior when no dialog listener exists.

use crate::error::Result;
use crate::interceptor::DialogInterceptor;
use crate::protocol::{DialogEvent, DialogHandle, DialogHub};
use async_trait::async_trait;
use playwright_rs::protocol::{Dialog, Page};
use std::sync::Arc;

/// A Playwright dialog as a [`DialogHandle`].
struct PlaywrightDialogHandle {
    dialog: Dialog,
}

#[async_trait]
impl DialogHandle for PlaywrightDialogHandle {
    async fn accept(&self, prompt_text: Option<&str>) -> Result<()> {
        self.dialog.accept(prompt_text).await?;
        Ok(())
    }

    async fn dismiss(&self) -> Result<()> {
        self.dialog.dismiss().await?;
        Ok(())
    }
}

/// Converts a Playwright dialog into a [`DialogEvent`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) for an
/// unknown dialog type.
pub fn dialog_event(dialog: Dialog) -> Result<DialogEvent> {
    let kind = dialog.type_().parse()?;
    let message = dialog.message().to_string();
    let default_value = dialog.default_value().to_string();

    Ok(
        DialogEvent::new(kind, message, Arc::new(PlaywrightDialogHandle { dialog }))
            .with_default_value(default_value),
    )
}

/// Forwards every dialog of `page` into a new [`DialogHub`].
///
/// Call once per page; each call installs another permanent handler.
pub async fn attach_page(page: &Page) -> Result<DialogHub> {
    let hub = DialogHub::new();
    let forward = hub.clone();

    page.on_dialog(move |dialog| {
        let hub = forward.clone();
        async move {
            let event = match dialog_event(dialog.clone()) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Dismissing unrecognized dialog: {}", e);
                    return dialog.dismiss().await;
                }
            };

            if let Some(unclaimed) = hub.dispatch(event) {
                tracing::warn!(
                    kind = %unclaimed.kind(),
                    dialog_message = unclaimed.message(),
                    "Dismissing dialog no arbitration was waiting for"
                );
                dialog.dismiss().await?;
            }
            Ok(())
        }
    })
    .await?;

    Ok(hub)
}

impl DialogInterceptor {
    /// Creates an interceptor for a Playwright page.
    ///
    /// Options are read from the environment (see
    /// [`ArbiterOptions::from_env`](crate::ArbiterOptions::from_env)).
    pub async fn for_page(page: &Page) -> Result<Self> {
        let options = crate::ArbiterOptions::from_env()?;
        let hub = attach_page(page).await?;
        Ok(Self::with_options(hub, options))
    }
}
