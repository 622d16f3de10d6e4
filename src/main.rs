// ==========================================
// 订单管控系统 - 命令行入口
// ==========================================
// 子命令: report / dashboard / notify / export / merge / config
// 错误: anyhow 汇总并附上下文
// ==========================================

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use order_control::config::ConfigManager;
use order_control::dashboard::{format_brl, DashboardView, ViewFilter};
use order_control::domain::{DeliveryStatus, Stage};
use order_control::export::default_file_name;
use order_control::i18n::{self, t, t_with_args};
use order_control::{logging, ClassifiedOrder, DashboardSnapshot, OrderApi};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "order-control", version, about = "订单管控系统 - 工序分拣与交付状态")]
struct Cli {
    /// 配置文件（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 订单表格（覆盖配置中的 input_path）
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// 语言（pt-BR / en）
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 忽略加载缓存
    #[arg(long, global = true)]
    refresh: bool,

    /// JSON 格式日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// 客户简称（Fantasia）
    #[arg(long)]
    customer: Option<String>,

    /// 客户订单号（Ped. Cliente）
    #[arg(long)]
    customer_ref: Option<String>,

    /// 交付状态
    #[arg(long)]
    status: Option<DeliveryStatus>,

    /// 工序
    #[arg(long)]
    stage: Option<Stage>,

    /// 下单日期起（YYYY-MM-DD，含）
    #[arg(long)]
    from: Option<NaiveDate>,

    /// 下单日期止（YYYY-MM-DD，含）
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for ViewFilter {
    fn from(args: FilterArgs) -> Self {
        ViewFilter {
            customer_display_name: args.customer,
            customer_order_ref: args.customer_ref,
            status: args.status,
            stage: args.stage,
            order_date_from: args.from,
            order_date_to: args.to,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 打印视图明细
    Report {
        #[arg(long, default_value = "portfolio")]
        view: DashboardView,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// 打印看板指标
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// 打印各工序提醒
    Notify,
    /// 导出视图为 xlsx
    Export {
        #[arg(long, default_value = "portfolio")]
        view: DashboardView,
        /// 输出文件（缺省按视图命名）
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// 合并订单表与补货表
    Merge {
        #[arg(long)]
        orders: PathBuf,
        #[arg(long)]
        fulfillment: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// 打印生效配置
    Config,
}

fn load_config(cli: &Cli) -> Result<ConfigManager> {
    let mut manager = ConfigManager::load(cli.config.as_deref()).context("配置加载失败")?;
    if let Some(input) = &cli.input {
        manager.config_mut().input_path = Some(input.clone());
    }
    if let Some(locale) = &cli.locale {
        manager.config_mut().locale = locale.clone();
    }
    Ok(manager)
}

fn take_snapshot(api: &mut OrderApi, refresh: bool) -> Result<DashboardSnapshot> {
    let now = Local::now().naive_local();
    let snapshot = api.snapshot(now, refresh).map_err(|_| anyhow::anyhow!(t("load.no_input")))?;

    if let Some(e) = &snapshot.error {
        eprintln!("{}", t_with_args("load.failed", &[("error", &e.to_string())]));
    } else {
        let report = &snapshot.report;
        eprintln!(
            "{}",
            t_with_args(
                "load.summary",
                &[
                    ("loaded", &report.loaded_rows.to_string()),
                    ("total", &report.total_rows.to_string()),
                    ("dropped", &report.dropped.len().to_string()),
                    ("warnings", &report.warnings.len().to_string()),
                ],
            )
        );
    }
    Ok(snapshot)
}

fn format_date(value: Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn print_rows(rows: &[&ClassifiedOrder]) {
    for row in rows {
        let line = &row.line;
        println!(
            "{:<12} {:<16} {:<20} {:<12} {:<10} {:>8} {:>16} {:<10} {:<14} {:<10}",
            line.order_id,
            line.customer_order_ref,
            line.customer_display_name,
            line.product_code,
            line.model_code,
            line.quantity,
            format_brl(line.total_value()),
            format_date(line.expected_delivery_date),
            i18n::stage_label(row.stage),
            i18n::status_label(row.status),
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    i18n::set_locale(&config.config().locale);
    let mut api = OrderApi::new(config);

    match cli.command {
        Command::Report { view, filter } => {
            let snapshot = take_snapshot(&mut api, cli.refresh)?;
            let rows = snapshot.view(view, &filter.into());
            if rows.is_empty() {
                println!("{}", t("report.empty"));
                return Ok(());
            }
            print_rows(&rows);
            let total: f64 = rows.iter().map(|r| r.total_value()).sum();
            println!("{}", t_with_args("report.items", &[("count", &rows.len().to_string())]));
            println!("{}", t_with_args("report.total", &[("value", &format_brl(total))]));
        }
        Command::Dashboard { filter } => {
            let snapshot = take_snapshot(&mut api, cli.refresh)?;
            let metrics = snapshot.metrics(&filter.into());

            println!("{}: {}", t("dashboard.customer_orders"), metrics.distinct_customer_orders);
            println!("{}: {}", t("dashboard.items"), metrics.item_count);
            println!("{}: {}", t("dashboard.pending"), metrics.pending_count);
            println!("{}: {}", t("dashboard.models"), metrics.distinct_models);
            println!("{}: {:.0}", t("dashboard.quantity"), metrics.total_quantity);
            for stage in Stage::ALL {
                println!(
                    "{}: {} / {}",
                    i18n::stage_label(stage),
                    metrics.count_by_stage.get(&stage).copied().unwrap_or(0),
                    format_brl(metrics.value_by_stage.get(&stage).copied().unwrap_or(0.0)),
                );
            }
            println!("{}: {}", t("dashboard.delivered_value"), format_brl(metrics.delivered_value));
            println!("{}: {}", t("dashboard.outstanding_value"), format_brl(metrics.outstanding_value));
            println!("{}:", t("dashboard.products"));
            for product in metrics.product_frequency.iter().take(30) {
                println!(
                    "  {:<12} {:>5}  {}",
                    product.product_code,
                    product.count,
                    product.model_codes.join(", ")
                );
            }
        }
        Command::Notify => {
            let snapshot = take_snapshot(&mut api, cli.refresh)?;
            for note in api.notifications(&snapshot) {
                println!(
                    "{}",
                    t_with_args(
                        "notify.line",
                        &[
                            ("view", &t(note.view.i18n_key())),
                            ("pending", &note.pending.to_string()),
                            ("late", &note.late.to_string()),
                            ("overdue", &note.order_date_overdue.to_string()),
                        ],
                    )
                );
            }
        }
        Command::Export {
            view,
            output,
            filter,
        } => {
            let snapshot = take_snapshot(&mut api, cli.refresh)?;
            let filter: ViewFilter = filter.into();
            let count = snapshot.view(view, &filter).len();
            let bytes = api.export_view(&snapshot, view, &filter).context("导出失败")?;
            let output = output.unwrap_or_else(|| PathBuf::from(default_file_name(view)));
            fs::write(&output, bytes)
                .with_context(|| format!("写入文件失败: {}", output.display()))?;
            println!(
                "{}",
                t_with_args(
                    "export.done",
                    &[
                        ("path", &output.display().to_string()),
                        ("count", &count.to_string()),
                    ],
                )
            );
        }
        Command::Merge {
            orders,
            fulfillment,
            output,
        } => {
            let summary = api
                .merge(&orders, &fulfillment, &output)
                .context("合并失败")?;
            println!(
                "{}",
                t_with_args(
                    "merge.done",
                    &[
                        ("path", &output.display().to_string()),
                        ("rows", &summary.total_rows().to_string()),
                    ],
                )
            );
        }
        Command::Config => {
            println!("{}", api.config().get_config_snapshot()?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json("warn");
    } else {
        logging::init_with_level("warn");
    }

    tracing::debug!(version = order_control::VERSION, "{} 启动", order_control::APP_NAME);
    run(cli)
}
