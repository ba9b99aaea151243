use anyhow::{anyhow, Result};
use qrcode::{render::svg, QrCode};
use resvg::render;
use tiny_skia::Pixmap;
use usvg::{Options, Tree};

/// Render a wallet address as a PNG QR code for the receive screen.
pub fn address_qr_png(address: &str) -> Result<Vec<u8>> {
    let svg_data = generate_qr_code(address)?;
    convert_svg_to_png(&svg_data)
}

// Generate QR code for a Solana address
fn generate_qr_code(address: &str) -> Result<Vec<u8>> {
    // Create QR code with high error correction
    let code = QrCode::with_error_correction_level(address, qrcode::EcLevel::H)
        .map_err(|e| anyhow!("Failed to generate QR code: {}", e))?;

    let svg_string = code
        .render()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(svg_string.into_bytes())
}

/// Converts SVG (as bytes) to PNG (returns Vec<u8> with PNG data).
fn convert_svg_to_png(svg_data: &[u8]) -> Result<Vec<u8>> {
    let opt = Options::default();
    let tree = Tree::from_data(svg_data, &opt).map_err(|e| anyhow!("Error parsing SVG: {}", e))?;

    let svg_size = tree.size();
    let width = svg_size.width() as u32;
    let height = svg_size.height() as u32;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("Failed to create Pixmap"))?;

    render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // Encode Pixmap (RGBA) to PNG
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_png_for_address() {
        let png = address_qr_png("So11111111111111111111111111111111111111112").unwrap();
        // PNG magic bytes
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
