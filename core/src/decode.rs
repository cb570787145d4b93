//! Response decoding.
//!
//! JSON bodies are decoded without looking at the status code. On failure the
//! raw body becomes the error message, so an error envelope such as
//! `{"errors":[{"message":"No project.","code":6}]}` is what the caller sees.

use image::DynamicImage;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{ApiError, Result};
use crate::http::HttpResponse;

pub fn json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|err| {
        warn!(status = response.status, error = %err, "response body did not decode");
        ApiError::Response {
            status: response.status,
            body: response.text().into_owned(),
        }
    })
}

/// Decode an image body, sniffing the format from its leading bytes.
pub fn icon(response: &HttpResponse) -> Result<DynamicImage> {
    Ok(image::load_from_memory(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Count, Project};
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn decodes_json_array() {
        let response = HttpResponse::new(
            200,
            r#"[{"id":1,"projectKey":"TEST","name":"Test Project","chartEnabled":false,"subtaskingEnabled":false,"projectLeaderCanEditProjectLeader":false,"textFormattingRule":"markdown","archived":false,"displayOrder":0}]"#,
        );
        let projects: Vec<Project> = json(&response).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, 1);
        assert_eq!(projects[0].project_key, "TEST");
    }

    #[test]
    fn non_json_body_becomes_the_error_message() {
        let response = HttpResponse::new(500, "Internal Server Error");
        let err = json::<Vec<Project>>(&response).unwrap_err();
        assert!(matches!(err, ApiError::Response { status: 500, .. }));
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn error_envelope_with_success_status_still_fails() {
        let body = r#"{"errors":[{"message":"Authentication failure.","code":11,"moreInfo":""}]}"#;
        let response = HttpResponse::new(200, body);
        let err = json::<Count>(&response).unwrap_err();
        assert_eq!(err.to_string(), body);
    }

    #[test]
    fn error_status_with_matching_body_decodes() {
        let response = HttpResponse::new(404, r#"{"count":3}"#);
        let count: Count = json(&response).unwrap();
        assert_eq!(count.count, 3);
    }

    #[test]
    fn sniffs_png_bytes() {
        let mut bytes = Vec::new();
        RgbaImage::new(2, 3)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        let img = icon(&HttpResponse::new(200, bytes)).unwrap();
        assert_eq!((img.width(), img.height()), (2, 3));
    }

    #[test]
    fn rejects_non_image_bytes() {
        let err = icon(&HttpResponse::new(404, r#"{"errors":[]}"#)).unwrap_err();
        assert!(matches!(err, ApiError::ImageDecode(_)));
    }
}
