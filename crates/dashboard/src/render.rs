//! Terminal rendering of one order detail.

use std::fmt::Write as _;

use balcao_display::{format_brl, status_label};
use balcao_orders::OrderAggregate;

/// Render the detail breakdown the dashboard prints for one order.
pub fn detail_view(order: &OrderAggregate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Pedido: {}", order.id);
    let _ = writeln!(out);
    let _ = writeln!(out, "Status          {}", status_label(order.status));
    let _ = writeln!(out, "Cliente         {}", order.customer.name);
    let _ = writeln!(
        out,
        "Telefone        {}",
        order.customer.phone.as_deref().unwrap_or("Não informado")
    );
    let _ = writeln!(out, "E-mail          {}", order.customer.email);
    let _ = writeln!(out, "Realizado em    {}", order.created_at.to_rfc3339());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<32} {:>6} {:>14} {:>14}",
        "Produto", "Qtd.", "Preço", "Subtotal"
    );
    for item in &order.items {
        let _ = writeln!(
            out,
            "{:<32} {:>6} {:>14} {:>14}",
            item.name,
            item.quantity,
            format_brl(item.unit_price),
            format_brl(item.subtotal)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<54} {:>14}",
        "Total do pedido",
        format_brl(order.total)
    );

    out
}
