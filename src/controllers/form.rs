use std::sync::Arc;

use crate::{
    api::LinkApi,
    error::{RemoteError, StoreError, SubmitError},
    history::LocalHistory,
    models::{CreateRequest, ShortLink},
    render::short_url,
    validate::{normalize_target, validate, ErrorKind},
};

/// Rendering side of the shortening form.
pub trait FormView: Send + Sync {
    /// Disable (or re-enable) submission while a request is in flight.
    fn set_busy(&self, busy: bool);
    /// One message per validation problem, in order.
    fn show_errors(&self, errors: &[ErrorKind]);
    fn show_failure(&self, message: &str);
    fn show_created(&self, link: &ShortLink, short_url: &str);
    /// Non-fatal information, e.g. the history could not be saved.
    fn show_notice(&self, message: &str);
    /// Clear the inputs after a successful submission.
    fn reset(&self);
}

pub struct FormController<V: FormView> {
    api: Arc<dyn LinkApi>,
    history: Option<Arc<LocalHistory>>,
    view: V,
    /// Host shown in short links, e.g. "lnkr.co.za".
    host: String,
}

impl<V: FormView> FormController<V> {
    pub fn new(api: Arc<dyn LinkApi>, view: V, host: impl Into<String>) -> Self {
        Self {
            api,
            history: None,
            view,
            host: host.into(),
        }
    }

    /// Record successful submissions in `history`.
    pub fn with_history(mut self, history: Arc<LocalHistory>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Validate and submit one form. `alias` is empty when no custom short
    /// link was requested.
    pub async fn submit(&self, raw_target: &str, alias: &str) -> Result<ShortLink, SubmitError> {
        self.view.set_busy(true);
        let result = self.submit_inner(raw_target, alias).await;
        self.view.set_busy(false);
        result
    }

    async fn submit_inner(&self, raw_target: &str, alias: &str) -> Result<ShortLink, SubmitError> {
        let target = normalize_target(raw_target);

        let errors = validate(&target, alias);
        if !errors.is_empty() {
            tracing::debug!("Rejected form input {:?}: {:?}", target, errors);
            self.view.show_errors(&errors);
            return Err(SubmitError::Invalid(errors));
        }

        let request = CreateRequest {
            target_link: target.clone(),
            short_link: (!alias.is_empty()).then(|| alias.to_owned()),
        };

        let link = match self.create(&request).await {
            Ok(link) => link,
            Err(err) => {
                self.view.show_failure(err.user_message());
                return Err(err.into());
            }
        };

        tracing::info!("Created short link '{}' -> {}", link.code, link.target);

        if let Some(history) = &self.history {
            if let Err(e) = history.append(&link).await {
                tracing::warn!("Failed to save '{}' to local history: {}", link.code, e);
                self.view
                    .show_notice("The short link was created but could not be saved locally.");
            }
        }

        self.view
            .show_created(&link, &short_url(&self.host, &link.code));
        self.view.reset();

        Ok(link)
    }

    async fn create(&self, request: &CreateRequest) -> Result<ShortLink, RemoteError> {
        let resp = self.api.create(request).await?;

        if !resp.is_success() {
            let msg = resp.msg.unwrap_or_default();
            tracing::info!("Backend refused short link (status {}): {}", resp.status, msg);
            return Err(RemoteError::Application(msg));
        }

        let code = resp
            .short_link
            .filter(|c| !c.is_empty())
            .ok_or_else(|| RemoteError::Malformed("success reply without short_link".into()))?;

        Ok(ShortLink {
            code,
            target: resp.target_link.unwrap_or_else(|| request.target_link.clone()),
            created_at: resp
                .created_date
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
        })
    }

    /// Links created from this client, oldest first.
    pub async fn history(&self) -> Result<Vec<ShortLink>, StoreError> {
        match &self.history {
            Some(history) => history.read_all().await,
            None => Ok(Vec::new()),
        }
    }
}
