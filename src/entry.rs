//! 対話式フォーム入力モジュール
//!
//! 作業者・品番コード・品名候補・行程・数量・作業日を順に入力し、送信する。

use crate::api::FormApi;
use crate::controller::FormController;
use crate::error::{FormError, Result};
use crate::store::FieldStore;
use dialoguer::{Input, Select};
use piecework_common::{Candidate, MessageKind, StatusMessage, Worker};

/// メッセージを端末に表示
pub fn print_message(message: &StatusMessage) {
    match message.kind {
        MessageKind::Success => println!("✔ {}", message.text),
        MessageKind::Error => eprintln!("✖ {}", message.text),
        MessageKind::None => {}
    }
}

/// 候補の表示ラベル
pub fn candidate_label(candidate: &Candidate) -> String {
    if candidate.book_name.is_empty() {
        candidate.work_name.clone()
    } else {
        format!("{} / {}", candidate.work_name, candidate.book_name)
    }
}

/// 前回の PersonID に一致する作業者の位置（なければ先頭）
pub fn default_worker_index(workers: &[Worker], person_id: &str) -> usize {
    workers.iter().position(|w| w.id == person_id).unwrap_or(0)
}

/// 対話式で入力して送信
pub async fn run_interactive_entry<A: FormApi, S: FieldStore>(
    controller: &mut FormController<A, S>,
) -> Result<()> {
    // 1. 作業者
    let workers = controller.reference().workers.clone();
    if workers.is_empty() {
        let person_id = prompt_text("PersonID", &controller.form().person_id)?;
        controller.set_person_id(person_id);
    } else {
        let labels: Vec<String> = workers.iter().map(Worker::label).collect();
        let idx = Select::new()
            .with_prompt("📌 PersonID")
            .items(&labels)
            .default(default_worker_index(&workers, &controller.form().person_id))
            .interact()
            .map_err(|e| FormError::CliExecution(e.to_string()))?;
        controller.set_person_id(workers[idx].id.clone());
    }

    // 2. 品番コード → 品名候補
    loop {
        let code = prompt_text("🔍 品番コード（空でスキップ）", &controller.form().task_code)?;
        if code.trim().is_empty() {
            controller.set_task_code("");
            controller.select_candidate(None);
            break;
        }
        controller.set_task_code(code.trim());

        let count = controller.lookup_candidates(&code).map(<[Candidate]>::len).unwrap_or(0);
        print_message(&controller.message());
        if count == 0 {
            continue;
        }

        let labels: Vec<String> = controller.candidates().iter().map(candidate_label).collect();
        let idx = Select::new()
            .with_prompt("📚 品名")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| FormError::CliExecution(e.to_string()))?;
        controller.select_candidate_at(idx)?;
        break;
    }

    // 3. 行程 → 単価
    let processes = controller.reference().processes.clone();
    if processes.is_empty() {
        let process = prompt_text("🛠 行程名", "")?;
        controller.set_process(process.trim());
    } else {
        let idx = Select::new()
            .with_prompt("🛠 行程名")
            .items(&processes)
            .default(0)
            .interact()
            .map_err(|e| FormError::CliExecution(e.to_string()))?;
        controller.set_process(processes[idx].clone());
    }
    println!("  単価: {}", controller.form().unit_price);

    // 4. 数量・作業日
    let quantity = prompt_text("📦 数量（個、分）", &controller.form().output_quantity)?;
    controller.set_output_quantity(quantity);

    let work_date = prompt_text("📅 作業日 (YYYY-MM-DD)", &controller.form().work_date)?;
    controller.set_work_date(work_date.trim());

    // 5. 送信
    let result = controller.submit().await;
    print_message(&controller.message());
    result.map(|_| ())
}

fn prompt_text(prompt: &str, initial: &str) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if !initial.is_empty() {
        input = input.default(initial.to_string());
    }
    input
        .interact_text()
        .map_err(|e| FormError::CliExecution(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_label() {
        assert_eq!(candidate_label(&Candidate::new("XXX", "YYY")), "XXX / YYY");
        assert_eq!(candidate_label(&Candidate::new("XXX", "")), "XXX");
    }

    #[test]
    fn test_default_worker_index() {
        let workers = vec![
            Worker { id: "101".into(), name: "Aさん".into() },
            Worker { id: "102".into(), name: "Bさん".into() },
        ];
        assert_eq!(default_worker_index(&workers, "102"), 1);
        assert_eq!(default_worker_index(&workers, "999"), 0);
        assert_eq!(default_worker_index(&workers, ""), 0);
    }
}
