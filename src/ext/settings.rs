use std::os::raw::c_char;
use std::path::Path;
use std::ptr;

use crate::settings::{self, Settings};

use super::error::{cstr_to_string, set_last_error};

#[repr(C)]
pub struct ExtSettings {
    pub(crate) inner: Settings,
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_settings_new() -> *mut ExtSettings {
    Box::into_raw(Box::new(ExtSettings {
        inner: Settings::default(),
    }))
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_settings_free(settings: *mut ExtSettings) {
    if settings.is_null() {
        return;
    }
    unsafe {
        let _ = Box::from_raw(settings);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_settings_load_from_file(path: *const c_char) -> *mut ExtSettings {
    let path = cstr_to_string(path);
    match settings::load_settings(path.as_deref().map(Path::new)) {
        Ok(settings) => Box::into_raw(Box::new(ExtSettings { inner: settings })),
        Err(err) => {
            set_last_error(format!("{:#}", err));
            ptr::null_mut()
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_settings_set_languages(
    settings: *mut ExtSettings,
    languages: *const c_char,
) -> bool {
    let Some(settings) = (unsafe { settings.as_mut() }) else {
        set_last_error("settings is null");
        return false;
    };
    let Some(languages) = cstr_to_string(languages) else {
        set_last_error("value is null");
        return false;
    };
    if languages.trim().is_empty() {
        set_last_error("languages is empty");
        return false;
    }
    settings.inner.languages = languages.trim().to_string();
    true
}

#[unsafe(no_mangle)]
pub extern "C" fn ocr_ext_settings_set_page_segmentation_mode(
    settings: *mut ExtSettings,
    psm: u32,
) -> bool {
    let Some(settings) = (unsafe { settings.as_mut() }) else {
        set_last_error("settings is null");
        return false;
    };
    if psm == 0 {
        set_last_error("page segmentation mode must be positive");
        return false;
    }
    settings.inner.page_segmentation_mode = psm;
    true
}
