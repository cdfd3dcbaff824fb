use std::os::raw::c_char;
use std::ptr;

use crate::error::RecognizeError;
use crate::settings::Settings;
use crate::{logging, recognize_text_with_settings};

use super::error::{cstr_to_string, set_last_error, string_to_c};
use super::settings::ExtSettings;

/// Recognizes text with default settings. Returns the result as JSON, or
/// NULL with the rejection available from `ocr_ext_last_error_message`.
#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_recognize_text(image_uri: *const c_char) -> *mut c_char {
    recognize_blocking(Settings::default(), cstr_to_string(image_uri))
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_recognize_text_with_settings(
    settings: *const ExtSettings,
    image_uri: *const c_char,
) -> *mut c_char {
    let Some(settings) = (unsafe { settings.as_ref() }) else {
        return reject(&RecognizeError::Processing {
            reason: "settings is null".to_string(),
        });
    };
    recognize_blocking(settings.inner.clone(), cstr_to_string(image_uri))
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_init_logging(verbose: bool) {
    logging::init(verbose);
}

fn recognize_blocking(settings: Settings, image_uri: Option<String>) -> *mut c_char {
    let Some(image_uri) = image_uri else {
        return reject(&RecognizeError::InvalidUri { uri: String::new() });
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            return reject(&RecognizeError::Processing {
                reason: format!("failed to start runtime: {}", err),
            });
        }
    };

    match runtime.block_on(recognize_text_with_settings(&image_uri, settings)) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => string_to_c(&json),
            Err(err) => reject(&RecognizeError::Processing {
                reason: format!("failed to serialize result: {}", err),
            }),
        },
        Err(err) => reject(&err),
    }
}

fn reject(err: &RecognizeError) -> *mut c_char {
    let rejection = err.to_rejection();
    let payload = serde_json::to_string(&rejection).unwrap_or_else(|_| rejection.message.clone());
    set_last_error(payload);
    ptr::null_mut()
}
