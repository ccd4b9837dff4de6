//! # Receipt Rendering
//!
//! Turns a committed sale into a printable HTML invoice. Rendering is
//! pure; the [`ReceiptPrinter`] trait covers the output side (a file, a
//! spooler, a browser tab) and is always invoked AFTER the sale has
//! committed.

use dyqan_core::CompletedSale;

use crate::error::ReceiptError;

/// Output side of receipt handling.
///
/// Implementations must not assume they can fail the sale: by the time
/// `print` runs, the ledger row exists.
pub trait ReceiptPrinter: Send + Sync {
    /// Emits the receipt for a committed sale.
    fn print(&self, sale: &CompletedSale) -> Result<(), ReceiptError>;
}

/// Escapes text for interpolation into HTML.
fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Renders a self-contained printable invoice document.
///
/// The document auto-opens the print dialog when loaded in a browser;
/// identifier lines (SKU, serial number, barcode) appear only when the
/// sold product carried them.
pub fn invoice_html(sale: &CompletedSale) -> String {
    let line = &sale.line;
    let date_str = sale.sale.created_at.format("%Y-%m-%d %H:%M:%S").to_string();

    let mut codes = String::new();
    if let Some(sku) = &line.sku_snapshot {
        codes.push_str(&format!("SKU: {}<br/>", esc(sku)));
    }
    if let Some(serial) = &line.serial_snapshot {
        codes.push_str(&format!("Nr. Serik: {}<br/>", esc(serial)));
    }
    if let Some(barcode) = &line.barcode_snapshot {
        codes.push_str(&format!("Barkod: {}<br/>", esc(barcode)));
    }

    format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <style>
    body {{ font-family: -apple-system, Segoe UI, Roboto, Arial; padding: 24px; color: #111; }}
    .top {{ display: flex; justify-content: space-between; align-items: flex-start; }}
    .h1 {{ font-size: 20px; font-weight: 800; margin: 0; }}
    .muted {{ color: #555; font-size: 12px; margin-top: 6px; }}
    .box {{ margin-top: 16px; border: 1px solid #ddd; border-radius: 12px; padding: 12px; }}
    table {{ width: 100%; border-collapse: collapse; margin-top: 10px; }}
    th, td {{ border-bottom: 1px solid #eee; padding: 10px 6px; font-size: 13px; text-align: left; }}
    th {{ font-weight: 800; background: #fafafa; }}
    .right {{ text-align: right; }}
    .total {{ font-size: 16px; font-weight: 900; }}
    .foot {{ margin-top: 18px; font-size: 12px; color: #666; }}
  </style>
</head>
<body>
  <div class="top">
    <div>
      <p class="h1">Faturë</p>
      <div class="muted">Nr: {invoice_no}<br/>Data: {date}</div>
    </div>
    <div class="muted" style="text-align:right;">Dyqan POS</div>
  </div>

  <div class="box">
    <div style="font-weight:800; margin-bottom:6px;">Produkti</div>
    <div>{name}</div>
    <div class="muted">{codes}</div>

    <table>
      <thead>
        <tr>
          <th>Artikulli</th>
          <th class="right">Sasia</th>
          <th class="right">Cmimi</th>
          <th class="right">Totali</th>
        </tr>
      </thead>
      <tbody>
        <tr>
          <td>{name}</td>
          <td class="right">{qty}</td>
          <td class="right">{unit_price}</td>
          <td class="right">{total}</td>
        </tr>
      </tbody>
    </table>

    <div style="display:flex; justify-content:flex-end; margin-top:12px;">
      <div class="total">TOTAL: {total}</div>
    </div>
  </div>

  <div class="foot">Faleminderit!</div>

  <script>
    window.addEventListener('load', () => {{
      try {{ window.print(); }} catch (e) {{}}
    }});
  </script>
</body>
</html>"#,
        invoice_no = esc(&sale.sale.invoice_no),
        date = esc(&date_str),
        name = esc(&line.name_snapshot),
        codes = codes,
        qty = line.quantity,
        unit_price = line.unit_price(),
        total = sale.sale.total(),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
