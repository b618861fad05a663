//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jstring, JNI_FALSE};
use jni::JNIEnv;

use crate::{render_json_to_svg, ColorScheme};

/// Render measurement JSON to SVG.
///
/// Called from Kotlin as:
///   external fun renderSvg(json: String, monochrome: Boolean): String?
#[no_mangle]
pub extern "system" fn Java_com_audiogram_app_AudiogramLib_renderSvg(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
    monochrome: jboolean,
) -> jstring {
    let json_str: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let scheme = if monochrome != JNI_FALSE { ColorScheme::Monochrome } else { ColorScheme::Dual };

    match render_json_to_svg(&json_str, scheme) {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("renderSvg failed: {e}");
            std::ptr::null_mut()
        }
    }
}
