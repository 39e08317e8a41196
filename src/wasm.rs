//! WebAssembly bindings for picascii

use crate::{convert, ConversionSettings, PicasciiError, PixelBuffer, Ramp};
use wasm_bindgen::prelude::*;

fn to_js(err: PicasciiError) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WasmConverter {
    settings: ConversionSettings,
}

#[wasm_bindgen]
impl WasmConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmConverter {
        WasmConverter { settings: ConversionSettings::default() }
    }

    #[wasm_bindgen]
    pub fn set_resolution(&mut self, resolution: f64) {
        self.settings.resolution = resolution;
    }

    /// Select a ramp by name; unknown names are rejected.
    #[wasm_bindgen]
    pub fn set_char_set(&mut self, name: &str) -> Result<(), JsValue> {
        self.settings.char_set = name.parse::<Ramp>().map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn set_inverted(&mut self, enabled: bool) {
        self.settings.inverted = enabled;
    }

    #[wasm_bindgen]
    pub fn set_grayscale(&mut self, enabled: bool) {
        self.settings.grayscale = enabled;
    }

    /// Convert canvas `ImageData` bytes (RGBA, row-major).
    ///
    /// Returns `{ text, rows, cols, colors }` where `colors` is a flat
    /// `Uint8Array` of RGB triplets in cell order.
    #[wasm_bindgen]
    pub fn convert(
        &self,
        image_data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<js_sys::Object, JsValue> {
        if image_data.is_empty() && width > 0 && height > 0 {
            return Err(to_js(PicasciiError::ContextUnavailable(
                "no pixel data was read from the canvas".into(),
            )));
        }
        let buffer = PixelBuffer::from_rgba(width, height, image_data.to_vec()).map_err(to_js)?;
        let conversion = convert(&buffer, &self.settings).map_err(to_js)?;

        let colors: Vec<u8> = conversion.grid.cells().flat_map(|c| c.color.to_array()).collect();

        let result = js_sys::Object::new();
        js_sys::Reflect::set(&result, &"text".into(), &conversion.text.as_str().into())?;
        let rows = conversion.grid.row_count() as u32;
        let cols = conversion.grid.column_count() as u32;
        js_sys::Reflect::set(&result, &"rows".into(), &rows.into())?;
        js_sys::Reflect::set(&result, &"cols".into(), &cols.into())?;
        js_sys::Reflect::set(&result, &"colors".into(), &js_sys::Uint8Array::from(&colors[..]))?;

        Ok(result)
    }
}

impl Default for WasmConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Names of the built-in ramps, in catalog order.
#[wasm_bindgen]
pub fn ramp_names() -> Vec<String> {
    Ramp::ALL.iter().map(|r| r.name().to_string()).collect()
}
