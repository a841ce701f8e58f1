//! Response encoding
//!
//! JSON output with optional two-space indentation and an optional JSONP
//! envelope:
//!
//! ```text
//! /**/ typeof cb === 'function' && cb({...}
//! );
//! ```
//!
//! The callback name is written verbatim, so `CALLBACK_PATTERN` is the only
//! thing standing between the query string and the script body.

use std::io::{self, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use super::constants::{CALLBACK_PATTERN, MAX_CALLBACK_LEN};

static CALLBACK_REGEX: Lazy<Regex> = Lazy::new(|| {
    // 常量正则，编译失败属于编码错误
    Regex::new(CALLBACK_PATTERN).expect("CALLBACK_PATTERN must compile")
});

/// 是否为可安全嵌入脚本的 JSONP callback 名称
pub fn is_valid_callback(callback: &str) -> bool {
    !callback.is_empty() && callback.len() < MAX_CALLBACK_LEN && CALLBACK_REGEX.is_match(callback)
}

/// Output options taken from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Only set when the name passed `is_valid_callback`
    pub callback: Option<String>,
    pub pretty: bool,
}

impl EncodeOptions {
    /// Read `callback` and `pretty`; the first occurrence of each wins.
    pub fn from_query(query: &str) -> Self {
        let mut callback: Option<String> = None;
        let mut pretty: Option<String> = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "callback" if callback.is_none() => callback = Some(value.into_owned()),
                "pretty" if pretty.is_none() => pretty = Some(value.into_owned()),
                _ => {}
            }
        }

        Self {
            callback: callback.filter(|c| is_valid_callback(c)),
            pretty: pretty.as_deref() == Some("1"),
        }
    }
}

/// Serialize `value` into `writer`.
///
/// The JSON document always ends with a newline. A failed write of the JSONP
/// preamble stops everything after it.
pub fn encode<W, T>(writer: &mut W, value: &T, options: &EncodeOptions) -> io::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if let Some(callback) = &options.callback {
        write!(
            writer,
            "/**/ typeof {cb} === 'function' && {cb}(",
            cb = callback
        )?;
    }

    if options.pretty {
        let formatter = ScriptSafeFormatter::new(PrettyFormatter::with_indent(b"  "));
        let mut ser = Serializer::with_formatter(&mut *writer, formatter);
        value.serialize(&mut ser)?;
    } else {
        let formatter = ScriptSafeFormatter::new(CompactFormatter);
        let mut ser = Serializer::with_formatter(&mut *writer, formatter);
        value.serialize(&mut ser)?;
    }
    writer.write_all(b"\n")?;

    if options.callback.is_some() {
        writer.write_all(b");")?;
    }

    Ok(())
}

/// Encode into a fresh buffer.
///
/// On error the bytes written so far are kept, mirroring a truncated body.
pub fn encode_to_vec<T>(value: &T, options: &EncodeOptions) -> (Vec<u8>, io::Result<()>)
where
    T: Serialize + ?Sized,
{
    let mut body = Vec::with_capacity(512);
    let result = encode(&mut body, value, options);
    (body, result)
}

/// Formatter wrapper escaping `<`, `>`, `&`, U+2028 and U+2029 inside strings
/// so the output stays inert when evaluated as a script.
pub struct ScriptSafeFormatter<F> {
    inner: F,
}

impl<F: Formatter> ScriptSafeFormatter<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for ScriptSafeFormatter<F> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped: &[u8] = match ch {
                '<' => b"\\u003c",
                '>' => b"\\u003e",
                '&' => b"\\u0026",
                '\u{2028}' => b"\\u2028",
                '\u{2029}' => b"\\u2029",
                _ => continue,
            };
            if start < i {
                writer.write_all(&fragment.as_bytes()[start..i])?;
            }
            writer.write_all(escaped)?;
            start = i + ch.len_utf8();
        }
        if start < fragment.len() {
            writer.write_all(&fragment.as_bytes()[start..])?;
        }
        Ok(())
    }
}
