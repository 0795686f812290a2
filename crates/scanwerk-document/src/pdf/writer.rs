// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — one rectified page image per PDF page, using `printpdf` 0.8.
//
// printpdf 0.8 builds documents from `PdfPage` values holding `Vec<Op>`
// operation lists; images are registered once as XObjects and placed with
// `Op::UseXobject`.

use std::path::Path;

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use scanwerk_core::error::Result;
use scanwerk_core::{PaperSize, ScanwerkError};
use tracing::{debug, info, instrument, warn};

/// Nominal resolution used to size page images before scaling.
const IMAGE_DPI: f32 = 300.0;

/// Builds multi-page PDFs in which every page is a single full-bleed image.
pub struct PdfWriter {
    paper_size: PaperSize,
    title: Option<String>,
}

impl PdfWriter {
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Title stored in the PDF /Info dictionary.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Image pages to PDF ---------------------------------------------------

    /// Create a PDF with one page per encoded image, in the given order.
    ///
    /// Each image is stretched to cover the whole page; the aspect ratio of
    /// the page wins over that of the image. An empty list is an error: there
    /// is no meaningful zero-page document.
    #[instrument(skip_all, fields(pages = images.len(), paper = ?self.paper_size))]
    pub fn create_from_images(&self, images: &[Vec<u8>]) -> Result<Vec<u8>> {
        if images.is_empty() {
            return Err(ScanwerkError::PdfError(
                "cannot create a PDF with no pages".into(),
            ));
        }

        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let title = self.title.as_deref().unwrap_or("Scanwerk Document");

        let mut doc = PdfDocument::new(title);
        let mut pages = Vec::with_capacity(images.len());

        for (index, bytes) in images.iter().enumerate() {
            let decoded = ::image::load_from_memory(bytes).map_err(|err| {
                ScanwerkError::ImageError(format!("failed to decode page {}: {}", index + 1, err))
            })?;
            let (img_w, img_h) = (decoded.width(), decoded.height());
            if img_w == 0 || img_h == 0 {
                return Err(ScanwerkError::EmptyImage {
                    width: img_w,
                    height: img_h,
                });
            }

            let raw = RawImage {
                pixels: RawImageData::U8(decoded.to_rgb8().into_raw()),
                width: img_w as usize,
                height: img_h as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let natural_w_pt = img_w as f32 / IMAGE_DPI * 72.0;
            let natural_h_pt = img_h as f32 / IMAGE_DPI * 72.0;
            let scale_x = page_w_pt / natural_w_pt;
            let scale_y = page_h_pt / natural_h_pt;
            debug!(page = index + 1, img_w, img_h, scale_x, scale_y, "Placing page image");

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: Some(scale_x),
                    scale_y: Some(scale_y),
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }];
            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialisation produced warnings");
        }

        info!(pages = images.len(), bytes = output.len(), "PDF created");
        Ok(output)
    }

    /// Create the PDF and write it to `path`.
    pub fn write_to_file(&self, images: &[Vec<u8>], path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.create_from_images(images)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::encode_jpeg;
    use image::{DynamicImage, Rgb, RgbImage};

    fn page(shade: u8) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 60, Rgb([shade; 3])));
        encode_jpeg(&img, 85).unwrap()
    }

    #[test]
    fn produces_pdf_header() {
        let pdf = PdfWriter::new(PaperSize::A4)
            .create_from_images(&[page(200)])
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = PdfWriter::new(PaperSize::A4)
            .create_from_images(&[])
            .unwrap_err();
        assert!(matches!(err, ScanwerkError::PdfError(_)));
    }

    #[test]
    fn undecodable_page_is_an_image_error() {
        let err = PdfWriter::new(PaperSize::Letter)
            .create_from_images(&[page(10), b"not an image".to_vec()])
            .unwrap_err();
        assert!(matches!(err, ScanwerkError::ImageError(msg) if msg.contains("page 2")));
    }

    #[test]
    fn multiple_pages_grow_the_document() {
        let writer = PdfWriter::new(PaperSize::A4);
        let one = writer.create_from_images(&[page(50)]).unwrap();
        let three = writer
            .create_from_images(&[page(50), page(120), page(220)])
            .unwrap();
        assert!(three.len() > one.len());
        assert!(three.starts_with(b"%PDF"));
    }

    #[test]
    fn write_to_file_persists_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        let mut writer = PdfWriter::new(PaperSize::A5);
        writer.set_title("Receipts");
        writer.write_to_file(&[page(90)], &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
