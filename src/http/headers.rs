use http::{
    header::{AsHeaderName, IntoHeaderName},
    HeaderMap, HeaderValue,
};

use crate::{Error, Result};

pub trait HeaderMapExt {
    fn headers(&self) -> &HeaderMap;

    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn header<K: AsHeaderName>(&self, key: K) -> Option<&HeaderValue> {
        self.headers().get(key)
    }

    fn header_str<K: AsHeaderName>(&self, key: K) -> Option<&str> {
        self.header(key).and_then(|value| value.to_str().ok())
    }

    fn insert_header<K: IntoHeaderName, V: AsRef<str>>(&mut self, key: K, value: V) -> Result<()> {
        let value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| Error::new(format!("Invalid header value: {e}")))?;
        self.headers_mut().insert(key, value);
        Ok(())
    }
}
