use crate::color::Rgb;
use crate::constants::{CUSTOM_BRAND, CUSTOM_PALETTE};
use crate::error::{Error, Result};
use glam::Vec3;
use rand::seq::SliceRandom;
use serde::Deserialize;

/// A printer with its build volume in millimeters.
#[derive(Clone, Debug, PartialEq)]
pub struct Printer {
    pub name: String,
    pub brand: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: Rgb,
}

impl Printer {
    pub fn new(name: impl Into<String>, brand: impl Into<String>, dims: Vec3, color: Rgb) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            x: dims.x,
            y: dims.y,
            z: dims.z,
            color,
        }
    }

    #[inline]
    pub fn dims(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn volume(&self) -> f32 {
        self.x * self.y * self.z
    }

    #[inline]
    pub fn liters(&self) -> f32 {
        self.volume() / 1_000_000.0
    }

    /// `"200 × 200 × 200 mm"`
    pub fn dimensions_text(&self) -> String {
        format!("{} × {} × {} mm", self.x, self.y, self.z)
    }

    /// `"8.00 L"`
    pub fn liters_text(&self) -> String {
        format!("{:.2} L", self.liters())
    }

    /// Case-insensitive name comparison used for replacement.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    x: f32,
    y: f32,
    z: f32,
    color: String,
}

#[derive(Debug, Deserialize)]
struct BrandGroup {
    brand: String,
    printers: Vec<CatalogEntry>,
}

/// Parse the grouped catalog JSON and flatten it into printers.
///
/// Entries with non-positive dimensions are rejected; unparseable colors fall
/// back to grey.
pub fn parse_catalog(json: &str) -> Result<Vec<Printer>> {
    let groups: Vec<BrandGroup> = serde_json::from_str(json)?;
    let mut printers = Vec::new();
    for group in groups {
        for entry in group.printers {
            if !valid_dimension(entry.x) || !valid_dimension(entry.y) || !valid_dimension(entry.z)
            {
                return Err(Error::InvalidDimensions {
                    name: entry.name,
                    x: entry.x,
                    y: entry.y,
                    z: entry.z,
                });
            }
            let color = Rgb::parse_hex(&entry.color).unwrap_or_else(|e| {
                log::warn!("[catalog] {}: {}", entry.name, e);
                Rgb::GREY
            });
            printers.push(Printer::new(
                entry.name,
                group.brand.clone(),
                Vec3::new(entry.x, entry.y, entry.z),
                color,
            ));
        }
    }
    log::info!("[catalog] loaded {} printers", printers.len());
    Ok(printers)
}

#[inline]
fn valid_dimension(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Raw values from the custom printer form.
#[derive(Clone, Debug, Default)]
pub struct CustomPrinterInput {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: String,
}

impl CustomPrinterInput {
    /// Validate the form. Returns `None` for non-finite or non-positive
    /// dimensions; an empty name becomes `Custom {n}` and an empty or invalid
    /// color is picked from the palette.
    pub fn into_printer(self, existing_count: usize) -> Option<Printer> {
        if !valid_dimension(self.x) || !valid_dimension(self.y) || !valid_dimension(self.z) {
            return None;
        }
        let name = match self.name.trim() {
            "" => format!("Custom {}", existing_count + 1),
            trimmed => trimmed.to_string(),
        };
        let color = match self.color.trim() {
            "" => random_palette_color(),
            hex => Rgb::parse_hex(hex).unwrap_or_else(|_| random_palette_color()),
        };
        Some(Printer::new(
            name,
            CUSTOM_BRAND,
            Vec3::new(self.x, self.y, self.z),
            color,
        ))
    }
}

pub fn random_palette_color() -> Rgb {
    let mut rng = rand::thread_rng();
    CUSTOM_PALETTE
        .choose(&mut rng)
        .and_then(|hex| Rgb::parse_hex(hex).ok())
        .unwrap_or(Rgb::GREY)
}

/// The session's printer list: catalog entries plus custom additions.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    printers: Vec<Printer>,
}

impl Catalog {
    pub fn new(printers: Vec<Printer>) -> Self {
        Self { printers }
    }

    pub fn printers(&self) -> &[Printer] {
        &self.printers
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Printer> {
        self.printers.iter().find(|p| p.name == name)
    }

    pub fn position_ignore_case(&self, name: &str) -> Option<usize> {
        self.printers.iter().position(|p| p.same_name(name))
    }

    /// Insert `printer`, replacing a case-insensitive name match in place.
    /// Returns the replaced printer.
    pub fn upsert(&mut self, printer: Printer) -> Option<Printer> {
        match self.position_ignore_case(&printer.name) {
            Some(idx) => Some(std::mem::replace(&mut self.printers[idx], printer)),
            None => {
                self.printers.push(printer);
                None
            }
        }
    }

    /// Printers whose name or brand contains `query` (case-insensitive),
    /// sorted by brand then name.
    pub fn filter(&self, query: &str) -> Vec<&Printer> {
        let needle = query.trim().to_lowercase();
        let mut out: Vec<&Printer> = self
            .printers
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
            })
            .collect();
        out.sort_by(|a, b| a.brand.cmp(&b.brand).then_with(|| a.name.cmp(&b.name)));
        out
    }
}
