//! 作業実績入力フォームのコントローラ
//!
//! フォーム状態・参照データ・品名候補・一時メッセージを一つの構造体で持ち、
//! 画面（CLI等）からの操作を受け付ける。
//!
//! - 起動時: 参照データの取得と前回入力の復元
//! - 品番コード → 品名候補の検索（クライアント側）
//! - 候補選択 → 品名・書名の同期
//! - 行程選択 → 単価の再計算
//! - 送信: 入力チェック → POST → 結果表示 → 前回入力の保存

use crate::api::FormApi;
use crate::error::{FormError, Result};
use crate::message::MessageBoard;
use crate::store::{FieldStore, PERSON_ID_KEY, WORK_DAY_KEY};
use chrono::NaiveDate;
use piecework_common::{Candidate, FormState, ReferenceData, StatusMessage};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const CODE_REQUIRED: &str = "品名コードを入力してください";
pub const NO_CANDIDATES: &str = "該当する品名がありません";
pub const PERSON_ID_REQUIRED: &str = "PersonID を選択してください";
pub const WORK_DATE_REQUIRED: &str = "作業日を選んでください";
pub const SUBMIT_SUCCEEDED: &str = "✅ 送信成功: ";

/// 作業日の書式
pub const WORK_DATE_FORMAT: &str = "%Y-%m-%d";

pub struct FormController<A, S> {
    api: A,
    store: S,
    form: FormState,
    reference: ReferenceData,
    candidates: Vec<Candidate>,
    selected: Option<Candidate>,
    messages: MessageBoard,
}

impl<A: FormApi, S: FieldStore> FormController<A, S> {
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            form: FormState::default(),
            reference: ReferenceData::default(),
            candidates: Vec::new(),
            selected: None,
            messages: MessageBoard::new(),
        }
    }

    /// 起動処理: 参照データ取得と前回入力の復元
    ///
    /// 両者が触る状態は重ならないので、取得失敗時も復元は行う。
    pub async fn start(&mut self) -> Result<()> {
        let loaded = self.load_reference_data().await;
        self.restore_fields();
        loaded
    }

    /// 参照データを一括取得
    ///
    /// 失敗時はエラーメッセージを表示し、参照データは空のまま。再試行はしない。
    pub async fn load_reference_data(&mut self) -> Result<()> {
        match self.api.fetch_init_data().await {
            Ok(data) => {
                self.reference = ReferenceData::from(data);
                info!(
                    "参照データ取得: 作業者{}件 行程{}件 単価{}件 品番{}件",
                    self.reference.workers.len(),
                    self.reference.processes.len(),
                    self.reference.unit_prices.len(),
                    self.reference.product_codes.len()
                );
                Ok(())
            }
            Err(e) => {
                warn!("参照データ取得失敗: {}", e);
                self.reference = ReferenceData::default();
                self.messages.error(e.to_string());
                Err(e)
            }
        }
    }

    /// 品番コードから品名候補を検索
    ///
    /// 候補一覧を置き換えるだけで、選択中の候補とフォームには触れない。
    pub fn lookup_candidates(&mut self, code: &str) -> Result<&[Candidate]> {
        let code = code.trim();
        if code.is_empty() {
            self.messages.error(CODE_REQUIRED);
            return Err(FormError::Validation(CODE_REQUIRED.into()));
        }

        self.candidates = self.reference.product_codes.get(code).to_vec();
        debug!("品名候補: {} -> {}件", code, self.candidates.len());

        if self.candidates.is_empty() {
            self.messages.error(NO_CANDIDATES);
        } else {
            self.messages
                .success(format!("候補が {} 件見つかりました", self.candidates.len()));
        }
        Ok(&self.candidates)
    }

    /// 候補を選択（`None` で解除）し、品名・書名を同期する
    pub fn select_candidate(&mut self, candidate: Option<Candidate>) {
        self.selected = candidate;
        self.sync_selection();
    }

    /// 候補一覧の位置で選択
    pub fn select_candidate_at(&mut self, index: usize) -> Result<()> {
        let candidate = self.candidates.get(index).cloned().ok_or_else(|| {
            FormError::Validation(format!(
                "候補番号が範囲外です: {} (候補 {} 件)",
                index + 1,
                self.candidates.len()
            ))
        })?;
        self.select_candidate(Some(candidate));
        Ok(())
    }

    fn sync_selection(&mut self) {
        match &self.selected {
            Some(candidate) => {
                self.form.work_name = candidate.work_name.clone();
                self.form.book_name = candidate.book_name.clone();
            }
            None => {
                self.form.work_name.clear();
                self.form.book_name.clear();
            }
        }
    }

    /// 行程を設定して単価を再計算
    pub fn set_process(&mut self, process: impl Into<String>) {
        self.form.process = process.into();
        self.on_process_changed();
    }

    /// 現在の行程から単価を求める。空・未登録は 0
    pub fn on_process_changed(&mut self) {
        self.form.unit_price = self.reference.unit_prices.price_for(&self.form.process);
    }

    pub fn set_person_id(&mut self, person_id: impl Into<String>) {
        self.form.person_id = person_id.into();
    }

    pub fn set_task_code(&mut self, task_code: impl Into<String>) {
        self.form.task_code = task_code.into();
    }

    pub fn set_output_quantity(&mut self, quantity: impl Into<String>) {
        self.form.output_quantity = quantity.into();
    }

    pub fn set_work_date(&mut self, work_date: impl Into<String>) {
        self.form.work_date = work_date.into();
    }

    /// 送信
    ///
    /// `&mut self` を取るため、前の送信が終わるまで次の送信は始められない。
    /// 成功時はサーバのメッセージを返し、PersonID・作業日を保存する。
    pub async fn submit(&mut self) -> Result<String> {
        if let Err(e) = self.validate() {
            self.messages.error(e.to_string());
            return Err(e);
        }

        let payload = self.form.to_payload();
        info!(
            "送信: personid={} workcd={} workprocess={} workoutput={} workday={}",
            payload.personid, payload.workcd, payload.workprocess, payload.workoutput, payload.workday
        );

        match self.api.submit(&payload).await {
            Ok(message) => {
                self.messages.success(format!("{}{}", SUBMIT_SUCCEEDED, message));
                if let Err(e) = self.persist_fields() {
                    warn!("前回入力の保存に失敗: {}", e);
                }
                Ok(message)
            }
            Err(e) => {
                warn!("送信失敗: {}", e);
                self.messages.error(e.to_string());
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.form.person_id.trim().is_empty() {
            return Err(FormError::Validation(PERSON_ID_REQUIRED.into()));
        }
        if self.form.work_date.trim().is_empty() {
            return Err(FormError::Validation(WORK_DATE_REQUIRED.into()));
        }
        NaiveDate::parse_from_str(self.form.work_date.trim(), WORK_DATE_FORMAT).map_err(|_| {
            FormError::Validation(format!(
                "作業日は YYYY-MM-DD 形式で入力してください: {}",
                self.form.work_date
            ))
        })?;
        Ok(())
    }

    /// PersonID と作業日を保存
    pub fn persist_fields(&mut self) -> Result<()> {
        self.store.set(PERSON_ID_KEY, &self.form.person_id)?;
        self.store.set(WORK_DAY_KEY, &self.form.work_date)?;
        Ok(())
    }

    /// 保存済みの PersonID と作業日を復元（未保存は空）
    pub fn restore_fields(&mut self) {
        self.form.person_id = self.store.get(PERSON_ID_KEY).unwrap_or_default();
        self.form.work_date = self.store.get(WORK_DAY_KEY).unwrap_or_default();
        debug!(
            "前回入力を復元: personid={:?} workday={:?}",
            self.form.person_id, self.form.work_date
        );
    }

    pub fn records_url(&self) -> String {
        self.api.records_url()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.selected.as_ref()
    }

    pub fn message(&self) -> StatusMessage {
        self.messages.current()
    }

    pub fn subscribe_messages(&self) -> watch::Receiver<StatusMessage> {
        self.messages.subscribe()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
