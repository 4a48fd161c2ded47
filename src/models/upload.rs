/// A file picked by the user, already read into memory
#[derive(Clone, PartialEq, Debug)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension without the dot
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn stem(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }

    /// Reads a browser `File` into memory
    #[cfg(target_arch = "wasm32")]
    pub async fn from_web_file(file: &web_sys::File) -> Result<Self, String> {
        let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(Self::new(file.name(), file.type_(), bytes))
    }
}
