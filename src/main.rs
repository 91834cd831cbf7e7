use clap::Parser;
use piecework_form::{cli, config, entry, error, logging};
use piecework_form::{FormController, HttpFormApi, JsonFileStore};
use cli::{Cli, Commands};
use config::Config;
use entry::{candidate_label, print_message};
use error::Result;

type CliController = FormController<HttpFormApi, JsonFileStore>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }

    match cli.command {
        Commands::Init => {
            let mut controller = build_controller(&config)?;
            println!("📋 参照データ取得: {}\n", config.server_url());
            let loaded = controller.load_reference_data().await;
            print_message(&controller.message());
            loaded?;

            let reference = controller.reference();
            println!("作業者 ({}件):", reference.workers.len());
            for worker in &reference.workers {
                println!("  {}", worker.label());
            }
            println!("行程 ({}件):", reference.processes.len());
            for process in &reference.processes {
                println!("  {} : {}", process, reference.unit_prices.price_for(process));
            }
            println!(
                "品番: {}件（候補 {}件）",
                reference.product_codes.len(),
                reference.product_codes.candidate_count()
            );
        }

        Commands::Lookup { code } => {
            let mut controller = build_controller(&config)?;
            let loaded = controller.load_reference_data().await;
            if loaded.is_err() {
                print_message(&controller.message());
            }
            loaded?;

            let found = controller.lookup_candidates(&code).map(|found| found.to_vec());
            print_message(&controller.message());
            for (i, candidate) in found?.iter().enumerate() {
                println!("  {}) {}", i + 1, candidate_label(candidate));
            }
        }

        Commands::Codes { code } => {
            let mut controller = build_controller(&config)?;
            let loaded = controller.load_reference_data().await;
            if loaded.is_err() {
                print_message(&controller.message());
            }
            loaded?;

            let results = controller.reference().product_codes.search(&code);
            if results.is_empty() {
                println!("該当する品番がありません");
            }
            for coded in &results {
                println!("  {}: {}", coded.code, candidate_label(&coded.candidate));
            }
        }

        Commands::Entry => {
            let mut controller = build_controller(&config)?;
            println!("📝 作業実績入力\n");
            if controller.start().await.is_err() {
                print_message(&controller.message());
            }
            entry::run_interactive_entry(&mut controller).await?;
            println!("\n一覧: {}", controller.records_url());
        }

        Commands::Submit { personid, workcd, select, process, output, workday } => {
            let mut controller = build_controller(&config)?;
            if controller.start().await.is_err() {
                print_message(&controller.message());
            }

            if let Some(personid) = personid {
                controller.set_person_id(personid);
            }
            if let Some(workday) = workday {
                controller.set_work_date(workday);
            }

            if let Some(code) = workcd {
                controller.set_task_code(code.trim());
                let found = controller.lookup_candidates(&code).map(|found| found.len());
                print_message(&controller.message());
                if found? > 0 {
                    let index = select.unwrap_or(1).saturating_sub(1);
                    controller.select_candidate_at(index)?;
                }
            }

            if let Some(process) = process {
                controller.set_process(process);
            }
            controller.set_output_quantity(output);

            let result = controller.submit().await;
            print_message(&controller.message());
            result?;
        }

        Commands::Saved => {
            let mut controller = build_controller(&config)?;
            controller.restore_fields();
            let form = controller.form();
            println!("前回入力:");
            println!("  PersonID: {}", if form.person_id.is_empty() { "(なし)" } else { form.person_id.as_str() });
            println!("  作業日: {}", if form.work_date.is_empty() { "(なし)" } else { form.work_date.as_str() });
        }

        Commands::Records => {
            let controller = build_controller(&config)?;
            println!("{}", controller.records_url());
        }

        Commands::Config { set_server, show } => {
            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ 接続先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  接続先: {}", config.server_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  保存先: {}", config.field_store_path()?.display());
            }
        }
    }

    Ok(())
}

fn build_controller(config: &Config) -> Result<CliController> {
    let api = HttpFormApi::from_config(config)?;
    let store = JsonFileStore::open(config.field_store_path()?);
    Ok(FormController::new(api, store))
}
