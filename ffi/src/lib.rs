//! C-ABI wrapper around the `todo-core` list state machine.
//!
//! # Overview
//! Lets a view layer written in any language with a C FFI host the todo list:
//! it asks for requests, executes them with its own HTTP stack, feeds the
//! responses back and renders from view snapshots.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `todo_list_begin_*` / `todo_list_finish_*` mirror the core `TodoList`
//!   1:1; `todo_list_fail_*` reports a round-trip that produced no response.
//! - An optional observer callback fires after every state change.
//! - The C caller owns all returned pointers and must call the matching
//!   `todo_free_*` function to release them.
//! - The handle is single-threaded: call it from one thread only.

pub mod types;

use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use todo_core::{ApiError, HttpResponse, TodoClient, TodoList};
use tracing::error;

use types::*;

/// Read a caller-owned C string, replacing invalid UTF-8.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn read_c_str(s: *const c_char) -> String {
    unsafe { CStr::from_ptr(s) }.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Create a new, empty todo list bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `todo_list_free`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_new(base_url: *const c_char) -> *mut FfiTodoList {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { read_c_str(base_url) };
        let list = FfiTodoList {
            inner: TodoList::new(TodoClient::new(&url)),
            observer: None,
        };
        Box::into_raw(Box::new(list))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a list created by `todo_list_new`. Safe to call with null.
///
/// Responses for requests still in flight must not be fed back afterwards.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_free(list: *mut FfiTodoList) {
    if !list.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(list) });
        }));
    }
}

/// Install (or, with a null `callback`, remove) the change observer.
///
/// The callback may read the list (`todo_list_view`, `todo_list_can_submit`)
/// or drive it further, but must not call `todo_list_free` on it.
/// Returns false if `list` is null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_set_observer(
    list: *mut FfiTodoList,
    callback: Option<FfiObserverFn>,
    user_data: *mut c_void,
) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return false;
        }
        let list = unsafe { &mut *list };
        list.observer = callback.map(|callback| FfiObserver {
            callback,
            user_data,
        });
        true
    }))
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Replace the draft text verbatim. Returns false if an argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_set_draft(list: *mut FfiTodoList, text: *const c_char) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() || text.is_null() {
            return false;
        }
        let text = unsafe { read_c_str(text) };
        unsafe { FfiTodoList::apply(list, |inner| Ok(inner.set_draft_text(text))) }.is_ok()
    }))
    .unwrap_or(false)
}

/// Whether the submit control should be enabled.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_can_submit(list: *const FfiTodoList) -> bool {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return false;
        }
        unsafe { &*list }.inner.can_submit()
    }))
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// The full-list request, handed out once per list.
///
/// Returns null if `list` is null or the load was already started.
/// The caller must free the returned pointer with `todo_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_begin_load(list: *mut FfiTodoList) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return std::ptr::null_mut();
        }
        let (request, observer) = {
            let list = unsafe { &mut *list };
            (list.inner.begin_load(), list.observer)
        };
        match request {
            Some(req) => {
                let ptr = FfiHttpRequest::from_core(req);
                unsafe { FfiTodoList::notify(observer, FfiChange::LoadStarted) };
                ptr
            }
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Apply the response to the request from `todo_list_begin_load`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_finish_load(
    list: *mut FfiTodoList,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    finish(list, response, "todo_list_finish_load", |inner, outcome| {
        inner.finish_load(outcome)
    })
}

/// Report that the load request produced no response at all.
/// `reason` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_fail_load(
    list: *mut FfiTodoList,
    reason: *const c_char,
) -> *mut FfiResult {
    fail(list, reason, "todo_list_fail_load", |inner, outcome| {
        inner.finish_load(outcome)
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// The create request for the current draft.
///
/// Returns null if `list` is null or the draft is blank.
/// The caller must free the returned pointer with `todo_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_begin_create(list: *const FfiTodoList) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return std::ptr::null_mut();
        }
        match unsafe { &*list }.inner.begin_create() {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Apply the response to a request from `todo_list_begin_create`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_finish_create(
    list: *mut FfiTodoList,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    finish(list, response, "todo_list_finish_create", |inner, outcome| {
        inner.finish_create(outcome)
    })
}

/// Report that a create request produced no response at all.
/// `reason` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_fail_create(
    list: *mut FfiTodoList,
    reason: *const c_char,
) -> *mut FfiResult {
    fail(list, reason, "todo_list_fail_create", |inner, outcome| {
        inner.finish_create(outcome)
    })
}

type Finish =
    fn(&mut TodoList, Result<HttpResponse, ApiError>) -> Result<todo_core::Change, ApiError>;

fn finish(
    list: *mut FfiTodoList,
    response: *const FfiHttpResponse,
    name: &str,
    op: Finish,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return FfiResult::null_arg("list");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let response = ffi_response_to_core(unsafe { &*response });
        match unsafe { FfiTodoList::apply(list, |inner| op(inner, Ok(response))) } {
            Ok(change) => FfiResult::ok(change),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| {
        error!(function = name, "panic caught at FFI boundary");
        FfiResult::panic(&format!("panic in {name}"))
    })
}

fn fail(list: *mut FfiTodoList, reason: *const c_char, name: &str, op: Finish) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return FfiResult::null_arg("list");
        }
        let reason = if reason.is_null() {
            "no response".to_string()
        } else {
            unsafe { read_c_str(reason) }
        };
        let outcome = Err(ApiError::Transport(reason));
        match unsafe { FfiTodoList::apply(list, |inner| op(inner, outcome)) } {
            Ok(change) => FfiResult::ok(change),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| {
        error!(function = name, "panic caught at FFI boundary");
        FfiResult::panic(&format!("panic in {name}"))
    })
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as an empty string.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_c_str(resp.body) }
    };
    HttpResponse::new(resp.status, body)
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Snapshot of everything the view renders.
///
/// Returns null if `list` is null. Free with `todo_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn todo_list_view(list: *const FfiTodoList) -> *mut FfiViewModel {
    catch_unwind(AssertUnwindSafe(|| {
        if list.is_null() {
            return std::ptr::null_mut();
        }
        FfiViewModel::from_core(unsafe { &*list }.inner.view())
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `todo_list_begin_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.path);
            free_c_string(req.body);
            for header in from_raw_slice(req.headers, req.headers_len) {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
    }));
}

/// Free an `FfiResult`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
    }));
}

/// Free an `FfiViewModel` returned by `todo_list_view`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_view(view: *mut FfiViewModel) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let view = unsafe { Box::from_raw(view) };
        unsafe {
            for item in from_raw_slice(view.items, view.items_len) {
                free_c_string(item.id);
                free_c_string(item.description);
            }
            free_c_string(view.count_label);
            free_c_string(view.empty_state_text);
            free_c_string(view.draft);
        }
    }));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn todo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
