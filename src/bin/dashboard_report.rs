use inventory_optimizer_lib::core::{config::ClientConfig, logging};
use inventory_optimizer_lib::dashboard::{self, fallback::MockSeries, ChartSource};
use inventory_optimizer_lib::models::Nullable;
use inventory_optimizer_lib::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let client = ApiClient::new(&ClientConfig::from_env())?;
    let today = chrono::Local::now().date_naive();

    println!("🔍 Loading dashboard from: {}", client.api_root());
    let board = dashboard::load_dashboard(&client, &MockSeries::default(), today).await?;

    println!("\n========= INVENTORY DASHBOARD =========\n");
    println!("Products:        {}", board.products.len());
    println!("Total stock:     {}", board.total_stock);
    println!("Low stock items: {}", board.low_stock.len());
    println!("Revenue:         {:.2} ({} sales, {} units)",
        board.revenue.revenue(), or_dash(&board.revenue.total_sales), or_dash(&board.revenue.total_quantity_sold));

    if !board.low_stock.is_empty() {
        println!("\n{:<25} | {:<12} | {:>8} | {:>9}", "Name", "SKU", "On hand", "Threshold");
        println!("{}", "-".repeat(62));
        for p in &board.low_stock {
            println!("{:<25} | {:<12} | {:>8} | {:>9}", p.name(), p.sku(), or_dash(&p.quantity_on_hand), or_dash(&p.low_stock_threshold));
        }
    }

    match &board.chart_source {
        ChartSource::Backend => println!("\nSales, last {} days:", board.chart.len()),
        ChartSource::Fallback { strategy, reason } => {
            println!("\n⚠️  Sales history unavailable ({}), showing {} data:", reason, strategy)
        }
    }
    let peak = board.chart.iter().map(|p| p.sales).fold(0.0_f64, f64::max).max(1.0);
    for point in &board.chart {
        let width = ((point.sales / peak) * 40.0).round() as usize;
        println!("{:>7} | {:<40} {}", point.label, "#".repeat(width), point.sales);
    }

    println!("\n=======================================\n");
    Ok(())
}

fn or_dash<T: std::fmt::Display>(field: &Nullable<T>) -> String {
    field.as_ref().map_or_else(|| "-".to_string(), |v| v.to_string())
}
