//! Image sources.
//!
//! A [`CaptureSource`] is either a file the user selected or a screenshot of
//! the visible browser tab. Both end up as a [`CapturedImage`].

mod file;
mod host;

use iris_core::image::ImageBytes;

pub use self::file::SelectedFile;
pub use self::host::{CaptureFormat, CaptureHost, HostError};
use crate::TRACING_TARGET;
use crate::data_url::decode_data_url;
use crate::error::{Error, Result};

/// Instruction sent with selected files.
const FILE_INSTRUCTION: &str = "Provide a clinical description of the image.";

/// Instruction sent with tab captures.
const TAB_INSTRUCTION: &str = "Provide a clinical description of the captured page image.";

/// Where the image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    /// A file the user picked.
    FileSelection(SelectedFile),
    /// A screenshot of the visible area of a tab.
    TabCapture {
        /// Target window's tab; `None` for the current one.
        tab_id: Option<u32>,
        format: CaptureFormat,
    },
}

impl CaptureSource {
    /// Tab capture of the current window as PNG.
    pub fn current_tab() -> Self {
        Self::TabCapture {
            tab_id: None,
            format: CaptureFormat::Png,
        }
    }

    /// Returns the instruction submitted with images from this source.
    pub fn default_instruction(&self) -> &'static str {
        match self {
            Self::FileSelection(_) => FILE_INSTRUCTION,
            Self::TabCapture { .. } => TAB_INSTRUCTION,
        }
    }

    /// Produces the image bytes.
    ///
    /// # Errors
    ///
    /// Tab capture fails with [`Error::Unavailable`] when the host cannot
    /// capture, [`Error::Denied`] when the host refuses, and
    /// [`Error::DataUrl`] when the host returns unusable data.
    pub async fn acquire(self, host: &dyn CaptureHost) -> Result<CapturedImage> {
        match self {
            Self::FileSelection(file) => {
                let (file_name, image) = file.into_parts();
                Ok(CapturedImage { file_name, image })
            }
            Self::TabCapture { tab_id, format } => {
                if !host.supports_tab_capture() {
                    tracing::warn!(target: TRACING_TARGET, "Host does not support tab capture");
                    return Err(Error::Unavailable);
                }

                let data_url = host
                    .capture_visible_tab(tab_id, format)
                    .await
                    .map_err(|err| {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            error = %err,
                            ?tab_id,
                            "Tab capture refused"
                        );
                        Error::Denied(err.message().to_owned())
                    })?;

                let image = decode_data_url(&data_url)?;
                tracing::debug!(
                    target: TRACING_TARGET,
                    ?tab_id,
                    %format,
                    media_type = image.media_type(),
                    size = image.len(),
                    "Tab captured"
                );

                Ok(CapturedImage {
                    file_name: format.file_name().to_owned(),
                    image,
                })
            }
        }
    }
}

/// An acquired image ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub file_name: String,
    pub image: ImageBytes,
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    enum Behavior {
        Unsupported,
        Refuse(&'static str),
        Return(&'static str),
    }

    struct FakeHost {
        behavior: Behavior,
        requested: Mutex<Option<(Option<u32>, CaptureFormat)>>,
    }

    impl FakeHost {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                requested: Mutex::new(None),
            }
        }
    }

    #[async_trait::async_trait]
    impl CaptureHost for FakeHost {
        fn supports_tab_capture(&self) -> bool {
            !matches!(self.behavior, Behavior::Unsupported)
        }

        async fn capture_visible_tab(
            &self,
            tab_id: Option<u32>,
            format: CaptureFormat,
        ) -> std::result::Result<String, HostError> {
            *self.requested.lock().unwrap() = Some((tab_id, format));
            match self.behavior {
                Behavior::Unsupported => unreachable!("capture called on unsupported host"),
                Behavior::Refuse(message) => Err(HostError::new(message)),
                Behavior::Return(url) => Ok(url.to_owned()),
            }
        }
    }

    #[tokio::test]
    async fn file_selection_passes_bytes_through() -> anyhow::Result<()> {
        let host = FakeHost::new(Behavior::Unsupported);
        let file = SelectedFile::new("tooth.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff, 0xd9]);
        let source = CaptureSource::FileSelection(file);
        assert_eq!(
            source.default_instruction(),
            "Provide a clinical description of the image."
        );

        let captured = source.acquire(&host).await?;

        assert_eq!(captured.file_name, "tooth.jpg");
        assert_eq!(captured.image.media_type(), "image/jpeg");
        assert_eq!(captured.image.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn tab_capture_decodes_data_url() -> anyhow::Result<()> {
        let host = FakeHost::new(Behavior::Return("data:image/png;base64,iVBORw0KGgo="));
        let source = CaptureSource::TabCapture {
            tab_id: Some(7),
            format: CaptureFormat::Png,
        };
        assert_eq!(
            source.default_instruction(),
            "Provide a clinical description of the captured page image."
        );

        let captured = source.acquire(&host).await?;

        assert_eq!(captured.file_name, "capture.png");
        assert_eq!(captured.image.media_type(), "image/png");
        assert_eq!(
            *host.requested.lock().unwrap(),
            Some((Some(7), CaptureFormat::Png))
        );
        Ok(())
    }

    #[tokio::test]
    async fn unsupported_host_is_unavailable() {
        let host = FakeHost::new(Behavior::Unsupported);
        let error = CaptureSource::current_tab().acquire(&host).await.unwrap_err();

        assert!(matches!(error, Error::Unavailable));
        assert!(host.requested.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn refusal_keeps_host_message() {
        let host = FakeHost::new(Behavior::Refuse("Cannot access contents of url"));
        let error = CaptureSource::current_tab().acquire(&host).await.unwrap_err();

        let error: iris_core::Error = error.into();
        assert_eq!(error.kind(), iris_core::ErrorKind::CaptureDenied);
        assert_eq!(error.message(), "Cannot access contents of url");
    }

    #[tokio::test]
    async fn garbage_capture_is_rejected() {
        let host = FakeHost::new(Behavior::Return("not a data url"));
        let error = CaptureSource::current_tab().acquire(&host).await.unwrap_err();
        assert!(matches!(error, Error::DataUrl(_)));
    }
}
