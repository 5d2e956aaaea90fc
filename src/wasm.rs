use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{CayleyTable, Generator, GeneratorParams, Quasigroup, generate};

/// Convert a CayleyTable to a JsValue (2D array of numbers).
fn table_to_js(table: &CayleyTable) -> Result<JsValue, JsError> {
    let rows: Vec<Vec<usize>> = table.rows().map(<[usize]>::to_vec).collect();
    serde_wasm_bindgen::to_value(&rows).map_err(|e| JsError::new(&e.to_string()))
}

/// Generate a Latin square of order n with the given seed.
/// Returns a 2D array directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate_table(n: usize, seed: u64) -> Result<JsValue, JsError> {
    if n < 1 {
        return Err(JsError::new("n must be at least 1"));
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let table = generate(n, &mut rng, &GeneratorParams::default());

    table_to_js(&table)
}

/// Detection results for a table passed in from JavaScript.
#[wasm_bindgen]
pub struct Analysis {
    pub latin: bool,
    pub proper: bool,
    #[wasm_bindgen(js_name = nonTrivial)]
    pub non_trivial: bool,
}

/// Analyze a 2D array as a Cayley table.
#[wasm_bindgen]
pub fn analyze(rows: JsValue) -> Result<Analysis, JsError> {
    let rows: Vec<Vec<usize>> =
        serde_wasm_bindgen::from_value(rows).map_err(|e| JsError::new(&e.to_string()))?;
    let table = CayleyTable::from_rows(&rows).map_err(|e| JsError::new(&e.to_string()))?;
    let latin = table.is_latin();
    let report = Quasigroup::new(table).report();

    Ok(Analysis {
        latin,
        proper: report.proper,
        non_trivial: report.non_trivial,
    })
}

/// A stateful generator that produces random Latin squares of one order.
#[wasm_bindgen]
pub struct WasmGenerator {
    generator: Generator<ChaCha20Rng>,
}

#[wasm_bindgen]
impl WasmGenerator {
    /// Create a new generator for tables of order `n`.
    ///
    /// The `seed` determines the random sequence.
    #[wasm_bindgen(constructor)]
    pub fn new(n: usize, seed: u64) -> Result<WasmGenerator, JsError> {
        if n < 1 {
            return Err(JsError::new("n must be at least 1"));
        }
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let generator = Generator::new(n, rng, GeneratorParams::default());
        Ok(WasmGenerator { generator })
    }

    /// Get the next table as a 2D array.
    pub fn next(&mut self) -> Result<JsValue, JsError> {
        let table = self
            .generator
            .next()
            .ok_or_else(|| JsError::new("generator exhausted"))?;
        table_to_js(&table)
    }
}
