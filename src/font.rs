use crate::{
    colour::Colour,
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TTF or OTF font. Fonts are embedded in their entirety in the generated PDF,
/// so large fonts noticeably increase the size of the output.
///
/// Fonts are owned by a [Document](crate::Document) and referred to by their
/// [Id] from then on, usually through a [SpanFont].
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("bytes", &self.face.as_slice().len())
            .finish()
    }
}

/// How text is set: which document font, at what size and in what colour. This is
/// the font handle the layout engine passes around when rendering to PDF.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
    pub colour: Colour,
}

impl SpanFont {
    /// Black text in font `id` at `size`
    pub fn new<S: Into<Pt>>(id: Id<Font>, size: S) -> SpanFont {
        SpanFont {
            id,
            size: size.into(),
            colour: Colour::default(),
        }
    }

    pub fn with_colour<C: Into<Colour>>(mut self, colour: C) -> SpanFont {
        self.colour = colour.into();
        self
    }

    pub fn with_size<S: Into<Pt>>(mut self, size: S) -> SpanFont {
        self.size = size.into();
        self
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn find_name(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if the font declares one
    pub fn name(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if the font declares one
    pub fn family(&self) -> Option<String> {
        self.find_name(owned_ttf_parser::name_id::FAMILY)
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at `size`
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at `size`; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// Extra space between lines at `size`
    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// How far apart two consecutive baselines are at `size`
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// The horizontal advance of `text` at `size`. Characters missing from the font
    /// are measured as the glyph they will be drawn with.
    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| {
                self.face()
                    .glyph_hor_advance(GlyphId(self.glyph_id_or_fallback(ch)))
                    .unwrap_or_default() as f32
            })
            .map(|advance| scaling * advance)
            .sum()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}')
    }

    /// The glyph `ch` is drawn with: its own, else U+FFFD, else '?', else `.notdef`
    pub(crate) fn glyph_id_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Weight class of the font, 400 being normal and 700 bold
    pub fn weight(&self) -> u16 {
        self.face().weight().to_number()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(pdf_writer::types::CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / self.face().units_per_em() as f32;

        let mut id_widths: Vec<(u16, f32)> = self
            .glyph_metrics()
            .into_iter()
            .map(|(gid, (advance, _))| (gid, advance as f32 * scaling))
            .collect();
        id_widths.sort_by_key(|(gid, _)| *gid);

        // the most common advance becomes the default width
        let mut width_counts: HashMap<u32, usize> = HashMap::new();
        for (_, width) in id_widths.iter() {
            *width_counts.entry(width.to_bits()).or_insert(0) += 1;
        }
        let default_width = width_counts
            .into_iter()
            .max_by_key(|&(bits, count)| (count, bits))
            .map(|(bits, _)| f32::from_bits(bits))
            .unwrap_or(1000.0);

        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);

        // runs of consecutive glyph ids share one entry
        let mut block: Vec<f32> = Vec::new();
        let mut block_start: u16 = 0;
        for (gid, width) in id_widths.into_iter() {
            if !block.is_empty() && gid as usize != block_start as usize + block.len() {
                widths.consecutive(block_start, std::mem::take(&mut block));
            }
            if block.is_empty() {
                block_start = gid;
            }
            block.push(width);
        }
        if !block.is_empty() {
            widths.consecutive(block_start, block);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let metrics = self.glyph_metrics();
        let max_width = metrics.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = metrics.values().map(|&(_, h)| h).max().unwrap_or_default();
        let sum_width: usize = metrics.values().map(|&(w, _)| w as usize).sum();
        let avg_width = sum_width as f32 / metrics.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let fallback_name = format!("F{font_index}");
        let name = self.name().unwrap_or_else(|| fallback_name.clone());
        let family = self.family().unwrap_or(fallback_name);

        let face = self.face();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(self.weight());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * scaling,
            bbox.y_min as f32 * scaling,
            bbox.x_max as f32 * scaling,
            (bbox.y_max.max(max_height)) as f32 * scaling,
        ));
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(1000.0),
        );
        descriptor.x_height(
            face.x_height()
                .or_else(|| face.capital_height())
                .unwrap_or_default() as f32
                * scaling,
        );
        // TODO: derive from the OS/2 weight class instead of a fixed stem
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    /// Every glyph reachable from a unicode cmap subtable, with the first character
    /// that maps to it
    fn glyph_chars(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();

        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(index) = subtable.glyph_index(codepoint).filter(|index| index.0 > 0)
                    {
                        map.entry(index.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Horizontal advance and height of every mapped glyph, in font units
    fn glyph_metrics(&self) -> HashMap<u16, (u16, i16)> {
        let face = self.face();
        self.glyph_chars()
            .into_keys()
            .filter_map(|gid| {
                let glyph = GlyphId(gid);
                let advance = face.glyph_hor_advance(glyph)?;
                let height = face
                    .glyph_bounding_box(glyph)
                    .map(|bbox| bbox.y_max.saturating_sub(bbox.y_min))
                    .unwrap_or_default();
                Some((gid, (advance, height)))
            })
            .collect()
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut glyphs: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        glyphs.sort_by_key(|&(gid, _)| gid);

        // bfchar blocks hold at most 100 entries
        for block in glyphs.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block.iter() {
                let mut utf16 = [0u16; 2];
                let code: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{code}>\n"));
            }
            map.push_str("endbfchar\n");
        }

        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            map.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(pdf_writer::Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_not_a_font() {
        let err = Font::load(vec![0, 1, 2, 3]).expect_err("not a font");
        assert!(matches!(err, PDFError::FaceParsingError(_)));
    }
}
