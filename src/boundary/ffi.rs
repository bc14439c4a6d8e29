//! C ABI over the process-wide [`Boundary`].
//!
//! Conventions shared by every function:
//!
//! - Store handles are `u64` tokens; `0` means "no store".
//! - Strings coming in are NUL-terminated UTF-8. A null or non-UTF-8 string
//!   makes the call a no-op.
//! - Getters return `1` and write the value through `out` when the value
//!   exists, otherwise return `0` and leave `out` untouched.
//! - Setters and removals return `1` when the write happened, `0` otherwise.
//! - Strings going out are [`kvb_buf`]s owned by the caller and released
//!   with [`kvb_buf_free`]; key lists are released with
//!   [`kvb_string_list_free`].
#![allow(non_camel_case_types)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;

use super::{Boundary, StoreRef};

const FOUND: i32 = 1;
const ABSENT: i32 = 0;

/// An owned byte buffer handed to the caller.
#[repr(C)]
pub struct kvb_buf {
    pub data: *mut u8,
    pub len: usize,
}

/// An owned array of [`kvb_buf`]s handed to the caller.
#[repr(C)]
pub struct kvb_string_list {
    pub items: *mut kvb_buf,
    pub len: usize,
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_open(path: *const c_char) -> u64 {
    read_str(path)
        .and_then(|path| Boundary::global().open(path))
        .map_or(0, StoreRef::as_raw)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_close(store: u64) {
    if let Some(handle) = StoreRef::from_raw(store) {
        Boundary::global().close(handle);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_all_keys(store: u64, out: *mut kvb_string_list) -> i32 {
    if out.is_null() {
        return ABSENT;
    }
    let Some(keys) = StoreRef::from_raw(store).and_then(|h| Boundary::global().all_keys(h)) else {
        return ABSENT;
    };
    let items: Vec<kvb_buf> = keys.into_iter().map(|k| into_buf(k.into_bytes())).collect();
    let items = items.into_boxed_slice();
    let len = items.len();
    unsafe {
        out.write(kvb_string_list {
            items: Box::into_raw(items).cast::<kvb_buf>(),
            len,
        });
    }
    FOUND
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_remove_value_for_key(store: u64, key: *const c_char) -> i32 {
    write(store, key, (), |b, h, k, ()| b.remove_value_for_key(h, k))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_remove_values_for_keys(
    store: u64,
    keys: *const *const c_char,
    keys_len: usize,
) -> i32 {
    let Some(handle) = StoreRef::from_raw(store) else {
        return ABSENT;
    };
    let Some(keys) = read_str_array(keys, keys_len) else {
        return ABSENT;
    };
    i32::from(Boundary::global().remove_values_for_keys(handle, &keys))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_string_for_key(store: u64, key: *const c_char, out: *mut kvb_buf) -> i32 {
    let value = read(store, key, Boundary::string_for_key).map(|s| into_buf(s.into_bytes()));
    write_out(out, value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_bool_for_key(store: u64, key: *const c_char, out: *mut bool) -> i32 {
    write_out(out, read(store, key, Boundary::bool_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_int32_for_key(store: u64, key: *const c_char, out: *mut i32) -> i32 {
    write_out(out, read(store, key, Boundary::int32_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_uint32_for_key(store: u64, key: *const c_char, out: *mut u32) -> i32 {
    write_out(out, read(store, key, Boundary::uint32_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_int64_for_key(store: u64, key: *const c_char, out: *mut i64) -> i32 {
    write_out(out, read(store, key, Boundary::int64_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_uint64_for_key(store: u64, key: *const c_char, out: *mut u64) -> i32 {
    write_out(out, read(store, key, Boundary::uint64_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_float_for_key(store: u64, key: *const c_char, out: *mut f32) -> i32 {
    write_out(out, read(store, key, Boundary::float_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_double_for_key(store: u64, key: *const c_char, out: *mut f64) -> i32 {
    write_out(out, read(store, key, Boundary::double_for_key))
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_string_value(
    store: u64,
    key: *const c_char,
    value: *const c_char,
) -> i32 {
    let Some(value) = read_str(value) else {
        return ABSENT;
    };
    write(store, key, value, Boundary::set_string_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_bool_value(store: u64, key: *const c_char, value: bool) -> i32 {
    write(store, key, value, Boundary::set_bool_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_int32_value(store: u64, key: *const c_char, value: i32) -> i32 {
    write(store, key, value, Boundary::set_int32_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_uint32_value(store: u64, key: *const c_char, value: u32) -> i32 {
    write(store, key, value, Boundary::set_uint32_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_int64_value(store: u64, key: *const c_char, value: i64) -> i32 {
    write(store, key, value, Boundary::set_int64_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_uint64_value(store: u64, key: *const c_char, value: u64) -> i32 {
    write(store, key, value, Boundary::set_uint64_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_float_value(store: u64, key: *const c_char, value: f32) -> i32 {
    write(store, key, value, Boundary::set_float_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_set_double_value(store: u64, key: *const c_char, value: f64) -> i32 {
    write(store, key, value, Boundary::set_double_value)
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_buf_free(buf: *mut kvb_buf) {
    if buf.is_null() {
        return;
    }
    unsafe {
        let buf = &mut *buf;
        free_buf(buf);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn kvb_string_list_free(list: *mut kvb_string_list) {
    if list.is_null() {
        return;
    }
    unsafe {
        let list = &mut *list;
        if !list.items.is_null() {
            let mut items = Box::from_raw(ptr::slice_from_raw_parts_mut(list.items, list.len));
            for item in items.iter_mut() {
                free_buf(item);
            }
        }
        list.items = ptr::null_mut();
        list.len = 0;
    }
}

fn read<T>(
    store: u64,
    key: *const c_char,
    get: impl FnOnce(&Boundary, StoreRef, &str) -> Option<T>,
) -> Option<T> {
    let handle = StoreRef::from_raw(store)?;
    let key = read_str(key)?;
    get(Boundary::global(), handle, key)
}

fn write<T>(
    store: u64,
    key: *const c_char,
    value: T,
    set: impl FnOnce(&Boundary, StoreRef, &str, T) -> bool,
) -> i32 {
    let Some(handle) = StoreRef::from_raw(store) else {
        return ABSENT;
    };
    let Some(key) = read_str(key) else {
        return ABSENT;
    };
    i32::from(set(Boundary::global(), handle, key, value))
}

fn write_out<T>(out: *mut T, value: Option<T>) -> i32 {
    match value {
        Some(value) if !out.is_null() => {
            unsafe { out.write(value) };
            FOUND
        }
        _ => ABSENT,
    }
}

fn read_str<'a>(input: *const c_char) -> Option<&'a str> {
    if input.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(input) }.to_str().ok()
}

/// A null array is an empty list; a null or non-UTF-8 entry rejects the
/// whole list.
fn read_str_array<'a>(items: *const *const c_char, len: usize) -> Option<Vec<&'a str>> {
    if items.is_null() || len == 0 {
        return Some(Vec::new());
    }
    let slice = unsafe { std::slice::from_raw_parts(items, len) };
    slice.iter().map(|item| read_str(*item)).collect()
}

fn into_buf(bytes: Vec<u8>) -> kvb_buf {
    let data = bytes.into_boxed_slice();
    let len = data.len();
    kvb_buf {
        data: Box::into_raw(data).cast::<u8>(),
        len,
    }
}

unsafe fn free_buf(buf: &mut kvb_buf) {
    if !buf.data.is_null() {
        unsafe { drop(Box::from_raw(ptr::slice_from_raw_parts_mut(buf.data, buf.len))) };
    }
    buf.data = ptr::null_mut();
    buf.len = 0;
}
