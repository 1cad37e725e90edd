//! macOS frontmost application lookup through NSWorkspace

use cocoa::base::{id, nil};
use cocoa::foundation::NSAutoreleasePool;
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::CStr;
use std::os::raw::c_char;

#[link(name = "AppKit", kind = "framework")]
extern "C" {}

/// Localized name of the frontmost application
pub fn frontmost_app_name() -> Option<String> {
    unsafe {
        let pool = NSAutoreleasePool::new(nil);
        let name = read_frontmost_name();
        let _: () = msg_send![pool, drain];
        name
    }
}

unsafe fn read_frontmost_name() -> Option<String> {
    let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
    if workspace == nil {
        return None;
    }

    let app: id = msg_send![workspace, frontmostApplication];
    if app == nil {
        return None;
    }

    let name: id = msg_send![app, localizedName];
    if name == nil {
        return None;
    }

    let utf8_ptr: *const c_char = msg_send![name, UTF8String];
    if utf8_ptr.is_null() {
        return None;
    }

    let name = CStr::from_ptr(utf8_ptr).to_string_lossy().into_owned();
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}
