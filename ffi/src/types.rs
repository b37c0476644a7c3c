//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.
//!
//! Arrays are handed out as boxed slices, so freeing them needs only the
//! pointer and the length that travelled with it.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use todo_core::{ApiError, Change, HttpMethod, TodoItem, TodoList, ViewModel, EMPTY_STATE_TEXT};

/// Called after every state change with the caller's `user_data`.
pub type FfiObserverFn = extern "C" fn(user_data: *mut c_void, change: FfiChange);

#[derive(Clone, Copy)]
pub(crate) struct FfiObserver {
    pub(crate) callback: FfiObserverFn,
    pub(crate) user_data: *mut c_void,
}

/// Opaque handle to a `TodoList`. C callers receive a pointer to this and
/// pass it back into every `todo_list_*` function.
pub struct FfiTodoList {
    pub(crate) inner: TodoList,
    pub(crate) observer: Option<FfiObserver>,
}

impl FfiTodoList {
    /// Run one state transition and tell the observer if anything changed.
    ///
    /// The observer is called after the borrow of `*list` has ended, so it may
    /// call back into any `todo_list_*` function except `todo_list_free`.
    ///
    /// # Safety
    /// `list` must be non-null, come from `todo_list_new` and not be freed.
    pub(crate) unsafe fn apply(
        list: *mut Self,
        op: impl FnOnce(&mut TodoList) -> Result<Change, ApiError>,
    ) -> Result<Change, ApiError> {
        let (result, observer) = {
            let list = unsafe { &mut *list };
            (op(&mut list.inner), list.observer)
        };
        if let Ok(change) = &result {
            if *change != Change::Unchanged {
                unsafe { Self::notify(observer, (*change).into()) };
            }
        }
        result
    }

    /// Invoke a copied-out observer.
    ///
    /// # Safety
    /// No reference into the list the observer belongs to may be live.
    pub(crate) unsafe fn notify(observer: Option<FfiObserver>, change: FfiChange) {
        if let Some(FfiObserver {
            callback,
            user_data,
        }) = observer
        {
            callback(user_data, change);
        }
    }
}

/// Allocate a C string, dropping interior NULs rather than failing.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let cstring = CString::new(s).unwrap_or_else(|err| {
        let mut bytes = err.into_vec();
        bytes.retain(|b| *b != 0);
        CString::new(bytes).unwrap_or_default()
    });
    cstring.into_raw()
}

/// Hand a `Vec` to C as pointer + length. Empty vectors become null.
pub(crate) fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    (Box::into_raw(items.into_boxed_slice()) as *mut T, len)
}

/// Take back a slice produced by `into_raw_slice`.
///
/// # Safety
/// `ptr` and `len` must come from the same `into_raw_slice` call and must
/// not have been reclaimed already.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

/// Free a string produced by `c_string`. Null is ignored.
///
/// # Safety
/// `s` must be null or come from `c_string` and not be freed twice.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiChange {
    Unchanged = 0,
    Loaded = 1,
    ItemAdded = 2,
    DraftChanged = 3,
    /// The list request was handed out; the view may show it is loading.
    LoadStarted = 4,
}

impl From<Change> for FfiChange {
    fn from(change: Change) -> Self {
        match change {
            Change::Unchanged => FfiChange::Unchanged,
            Change::Loaded => FfiChange::Loaded,
            Change::ItemAdded => FfiChange::ItemAdded,
            Change::DraftChanged => FfiChange::DraftChanged,
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Handed out by `todo_list_begin_*`. The C caller executes the request and
/// reports back through the matching `todo_list_finish_*` or
/// `todo_list_fail_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: todo_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), c_string),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to a `todo_list_finish_*` function. The FFI layer reads
/// but does not free these fields. A null `body` reads as empty.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Deserialization = 2,
    Serialization = 3,
    Transport = 4,
    EmptyDraft = 5,
    Panic = 6,
    NullArg = 7,
}

/// Result envelope for every `todo_list_finish_*` / `todo_list_fail_*` call.
///
/// On success `error_code` is `Ok`, `error_message` is null and `change`
/// says what moved. On failure `error_message` is a human-readable C string
/// and `change` is `Unchanged`.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub change: FfiChange,
}

impl FfiResult {
    pub(crate) fn ok(change: Change) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            change: change.into(),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let error_code = match &err {
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            // Unmounted is the async controller's; TodoList never returns it.
            ApiError::Transport(_) | ApiError::Unmounted => FfiErrorCode::Transport,
            ApiError::EmptyDraft => FfiErrorCode::EmptyDraft,
        };
        Self::error(error_code, err.status().unwrap_or(0), &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg)
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            change: FfiChange::Unchanged,
        }))
    }
}

// ---------------------------------------------------------------------------
// View snapshot
// ---------------------------------------------------------------------------

/// A single todo item exposed to C. `id` is the server's id as text.
#[repr(C)]
pub struct FfiTodo {
    pub id: *mut c_char,
    pub description: *mut c_char,
}

impl FfiTodo {
    fn from_core(item: TodoItem) -> Self {
        FfiTodo {
            id: c_string(item.id.to_string()),
            description: c_string(item.description),
        }
    }
}

/// Everything a C view needs to render, as of the moment it was taken.
///
/// `count_label` is null for an empty list; `empty_state_text` is null for a
/// non-empty one.
#[repr(C)]
pub struct FfiViewModel {
    pub items: *mut FfiTodo,
    pub items_len: u32,
    pub count_label: *mut c_char,
    pub show_empty_state: bool,
    pub empty_state_text: *mut c_char,
    pub draft: *mut c_char,
    pub submit_enabled: bool,
    pub loading: bool,
}

impl FfiViewModel {
    pub(crate) fn from_core(view: ViewModel) -> *mut Self {
        let items: Vec<FfiTodo> = view.items.into_iter().map(FfiTodo::from_core).collect();
        let (items, items_len) = into_raw_slice(items);
        let empty_state_text = if view.show_empty_state {
            c_string(EMPTY_STATE_TEXT)
        } else {
            std::ptr::null_mut()
        };

        Box::into_raw(Box::new(FfiViewModel {
            items,
            items_len,
            count_label: view.count_label.map_or(std::ptr::null_mut(), c_string),
            show_empty_state: view.show_empty_state,
            empty_state_text,
            draft: c_string(view.draft),
            submit_enabled: view.submit_enabled,
            loading: view.loading,
        }))
    }
}
