use crate::foundation::error::{DriftMapError, DriftMapResult};
use crate::render::plan::FaceRole;
use std::collections::HashMap;
use usvg::fontdb;

/// Families tried, in order, for the glyph symbols before falling back to the sans-serif face.
const SYMBOL_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Noto Sans Symbols 2",
    "Noto Sans Math",
    "Segoe UI Symbol",
    "Symbola",
    "Apple Symbols",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Raw font bytes for one face (`index` selects the face inside collections).
#[derive(Clone, Debug)]
pub struct FaceData {
    pub bytes: Vec<u8>,
    pub index: u32,
}

/// Faces resolved for each [`FaceRole`]. A role without a face renders no text.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: HashMap<FaceRole, FaceData>,
}

impl FontBook {
    /// Empty book: every text op is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve faces from the system font database.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        let book = Self::from_database(&db);
        tracing::debug!(
            system_faces = db.faces().count(),
            resolved_roles = book.faces.len(),
            "resolved system fonts"
        );
        book
    }

    pub fn from_database(db: &fontdb::Database) -> Self {
        let mut faces = HashMap::new();
        let sans = [fontdb::Family::SansSerif, fontdb::Family::Serif];

        if let Some(face) = query_face(db, &sans, fontdb::Weight::NORMAL) {
            faces.insert(FaceRole::Regular, face);
        }
        if let Some(face) = query_face(db, &sans, fontdb::Weight::BOLD) {
            faces.insert(FaceRole::Bold, face);
        }

        let mut symbol: Vec<fontdb::Family<'_>> =
            SYMBOL_FAMILIES.iter().map(|name| fontdb::Family::Name(*name)).collect();
        symbol.extend(sans);
        if let Some(face) = query_face(db, &symbol, fontdb::Weight::NORMAL) {
            faces.insert(FaceRole::Symbol, face);
        }

        Self { faces }
    }

    pub fn with_face(mut self, role: FaceRole, face: FaceData) -> Self {
        self.faces.insert(role, face);
        self
    }

    pub fn face(&self, role: FaceRole) -> Option<&FaceData> {
        self.faces.get(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

fn query_face(
    db: &fontdb::Database,
    families: &[fontdb::Family<'_>],
    weight: fontdb::Weight,
) -> Option<FaceData> {
    let id = db.query(&fontdb::Query {
        families,
        weight,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    })?;
    db.with_face_data(id, |data, index| FaceData {
        bytes: data.to_vec(),
        index,
    })
}

/// Parley layout bound to a single registered face.
///
/// One engine per face keeps shaping and painting on the same font: the font collection holds
/// nothing else, so Parley cannot fall back to a face the painter does not know about.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    pub(crate) fn for_face(face: &FaceData) -> DriftMapResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DriftMapError::render("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DriftMapError::render("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.clone()),
            face.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape one line of plain text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> DriftMapResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DriftMapError::render("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
