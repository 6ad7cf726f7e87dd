// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{future::Future, sync::Arc};

use futures_util::{FutureExt, future::BoxFuture};

use crate::CommonResult;

/// `(current_line) -> candidates`. Called on every Tab, results are never cached.
pub type CompletionProvider =
    Arc<dyn Fn(String) -> BoxFuture<'static, CommonResult<Vec<String>>> + Send + Sync>;

/// Box up an async closure as a [`CompletionProvider`].
pub fn completion_provider<F, Fut>(provider: F) -> CompletionProvider
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommonResult<Vec<String>>> + Send + 'static,
{
    Arc::new(move |line| provider(line).boxed())
}

/// A provider that offers every name in `words` that starts with the last token of the
/// line. A line ending in whitespace offers nothing.
#[must_use]
pub fn prefix_completion_provider(words: Vec<String>) -> CompletionProvider {
    let words = Arc::new(words);
    completion_provider(move |line: String| {
        let words = Arc::clone(&words);
        async move {
            if line.ends_with(char::is_whitespace) {
                return Ok(vec![]);
            }
            let prefix = line.split_whitespace().last().unwrap_or_default();
            Ok(words
                .iter()
                .filter(|it| it.starts_with(prefix))
                .cloned()
                .collect())
        }
    })
}

/// Ask `provider` for candidates. A failing provider is logged and treated as having no
/// candidates. No provider means no candidates.
pub async fn fetch_candidates(
    maybe_provider: Option<&CompletionProvider>,
    line: String,
) -> Vec<String> {
    let Some(provider) = maybe_provider else {
        return vec![];
    };

    match provider(line.clone()).await {
        Ok(candidates) => candidates,
        Err(report) => {
            tracing::warn!(
                message = "completion provider failed",
                line = %line,
                error = ?report
            );
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommonError, CommonErrorType};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_no_provider() {
        assert!(fetch_candidates(None, "x".into()).await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_provider_yields_nothing() {
        let provider = completion_provider(|_| async {
            CommonError::new_error_result(CommonErrorType::General, "offline")
        });
        assert!(fetch_candidates(Some(&provider), "x".into()).await.is_empty());
    }

    #[tokio::test]
    async fn test_prefix_provider() {
        let provider = prefix_completion_provider(vec![
            "build".into(),
            "bundle".into(),
            "run".into(),
        ]);
        assert_eq!(
            fetch_candidates(Some(&provider), "run bu".into()).await,
            vec!["build".to_string(), "bundle".to_string()]
        );
        assert_eq!(
            fetch_candidates(Some(&provider), "r".into()).await,
            vec!["run".to_string()]
        );
        assert!(fetch_candidates(Some(&provider), "run ".into()).await.is_empty());
    }
}
