//! Portuguese display labels for order statuses.

use balcao_orders::OrderStatus;

/// Label shown next to the status indicator in the detail view.
pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pendente",
        OrderStatus::Canceled => "Cancelado",
        OrderStatus::Processing => "Em preparo",
        OrderStatus::Delivering => "Em entrega",
        OrderStatus::Delivered => "Entregue",
    }
}
