use anyhow::Result;
use std::future::Future;
use chrono::{NaiveDate, Utc};
use chrono_tz::US::Eastern;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use options_desk::assistant::{ChatSession, SimulatedResponder};
use options_desk::config::SharedConfig;
use options_desk::countdown::{CountdownTimer, WaitingPeriod};
use options_desk::models::{TradeRecord, WithdrawalStatus};
use options_desk::records::{self, RecordsQuery, RecordsSummary, SortKey, TypeFilter};
use options_desk::seed;
use options_desk::treasury::{WithdrawalDesk, WithdrawalRequest};
use options_desk::workspace::{ActiveModal, Workspace};

const SEED_TRADES: usize = 48;

const HELP: &str = "\
commands:
  records                 show the current records page
  search <term>           filter records by date/type/strike/risk
  filter <all|put|call|both>
  sort <date|pnl|risk|none>
  page <n>                jump to a records page
  summary                 records summary
  treasury                fund breakdown
  recommend               suggested withdrawal for this week
  withdraw <amount> <destination...>
  history [pending|completed]
  wait [minutes]          start a waiting period
  status                  waiting period progress
  ask <prompt>            ask the assistant (Ctrl+C stops waiting)
  clear                   clear the assistant conversation
  panel <width|toggle>    resize or show/hide the context panel
  quit";

/// Terminal front end over the desk state. Each piece of state is owned
/// here and lent to the library functions that need it.
pub struct OptionsDesk {
    config: SharedConfig,
    workspace: Workspace,
    records: Vec<TradeRecord>,
    query: RecordsQuery,
    treasury: WithdrawalDesk,
    chat: ChatSession<SimulatedResponder>,
    waiting: Option<CountdownTimer>,
}

impl OptionsDesk {
    pub async fn new(config: SharedConfig) -> Self {
        let cfg = config.read().await;
        let today = today_eastern();

        info!("{}", "=".repeat(60));
        info!("Options desk assistant starting up");
        info!("Records page size: {}", cfg.records_page_size);
        info!(
            "Withdrawal ratio: {:.0}% | fee: ${:.2}",
            cfg.withdrawal_ratio * 100.0,
            cfg.withdrawal_fee
        );
        info!("Countdown tick: {}s", cfg.countdown_tick().as_secs());
        info!("{}", "=".repeat(60));

        let workspace = Workspace::new(&cfg);
        let treasury =
            WithdrawalDesk::new(&cfg, seed::breakdown(today), seed::withdrawals(today));
        let chat = ChatSession::new(SimulatedResponder::new(cfg.chat_response_delay()));
        let query = RecordsQuery::with_page_size(cfg.records_page_size);

        drop(cfg);

        Self {
            config,
            workspace,
            records: seed::trade_records(SEED_TRADES, today),
            query,
            treasury,
            chat,
            waiting: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Desk is ready. Type `help` for commands, Ctrl+C to stop.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    self.shutdown();
                    return Ok(());
                }
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.handle(line.trim()).await {
                                self.shutdown();
                                return Ok(());
                            }
                        }
                        None => {
                            self.shutdown();
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    /// Returns false when the user asked to quit.
    async fn handle(&mut self, line: &str) -> bool {
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "help" => println!("{}", HELP),
            "quit" | "exit" => return false,
            "records" => self.show_records(),
            "search" => {
                self.query.set_search(rest);
                self.show_records();
            }
            "filter" => {
                self.query.set_filter(TypeFilter::from_str_loose(rest));
                self.show_records();
            }
            "sort" => {
                self.query.set_sort(SortKey::from_str_loose(rest));
                self.show_records();
            }
            "page" => {
                self.query.page = rest.parse().unwrap_or(1);
                self.show_records();
            }
            "summary" => self.show_summary(),
            "treasury" => self.show_treasury(),
            "recommend" => self.show_recommendation(),
            "withdraw" => self.withdraw(rest),
            "history" => self.show_history(rest),
            "wait" => self.start_waiting(rest).await,
            "ask" => return self.ask(rest).await,
            "clear" => {
                self.chat.clear();
                println!("Conversation cleared");
            }
            "panel" if rest == "toggle" => {
                self.workspace.panel.toggle();
                println!(
                    "Context panel {}",
                    if self.workspace.panel.open { "shown" } else { "hidden" }
                );
            }
            "panel" => {
                let width = rest.parse().unwrap_or(self.workspace.panel.width);
                println!("Context panel width: {}px", self.workspace.panel.resize(width));
            }
            "status" => self.show_waiting(),
            other => println!("Unknown command `{}`. Type `help`.", other),
        }
        true
    }

    fn show_records(&mut self) {
        self.workspace.open_modal(ActiveModal::Records);
        let page = records::run_query(&self.records, &self.query);

        println!(
            "Records | search: \"{}\" | filter: {} | sort: {}",
            self.query.search_term,
            self.query.filter,
            self.query
                .sort_by
                .map_or("none".to_string(), |s| s.to_string())
        );
        println!(
            "{:<8} {:<10} {:<5} {:<8} {:<9} {:>4} {:<10} {:>9}",
            "ID", "DATE", "TYPE", "STRIKE", "RISK", "VOL", "RESULT", "P&L"
        );
        for r in &page.records {
            println!(
                "{:<8} {:<10} {:<5} {:<8} {:<9} {:>4} {:<10} {:>9.2}",
                r.id,
                r.display_date(),
                r.option_type,
                r.strike,
                r.risk,
                r.volume,
                r.result,
                r.pnl
            );
        }
        println!(
            "{} | page {} of {}{}{}",
            page.showing_label(),
            page.page,
            page.display_total_pages(),
            if page.has_prev() { " | `page` back" } else { "" },
            if page.has_next() { " | more with `page`" } else { "" }
        );
    }

    fn show_summary(&self) {
        let filtered = records::filter_and_sort(&self.records, &self.query);
        let s = RecordsSummary::from_records(&filtered);
        match serde_json::to_string_pretty(&s) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Could not render summary: {}", e),
        }
    }

    fn show_treasury(&mut self) {
        self.workspace.open_modal(ActiveModal::Treasury);
        let b = &self.treasury.breakdown;
        println!("Total:     ${:>12.2}", b.total);
        println!("Available: ${:>12.2} ({:.1}%)", b.available, b.available_pct());
        println!("Locked:    ${:>12.2} ({:.1}%)", b.locked, b.locked_pct());
        println!(
            "Pending:   ${:>12.2} ({:.1}%)",
            b.pending_total(),
            b.pending_pct()
        );
        for share in b.pending_release_shares() {
            println!(
                "  ${:>10.2} on {} ({:.1}%) {}",
                share.amount, share.release_date, share.pct_of_total, share.reason
            );
        }
        if !b.is_consistent() {
            warn!("Fund breakdown does not add up: {:.2} unaccounted", b.unaccounted());
        }
    }

    fn show_recommendation(&self) {
        let weekly = records::weekly_profit(&self.records, Utc::now());
        let rec = self.treasury.recommendation(weekly);
        println!(
            "Weekly profit ${:.2} x {:.0}% => recommended withdrawal ${:.2}{}",
            rec.weekly_profit,
            rec.ratio * 100.0,
            rec.amount,
            if rec.capped_by_balance {
                " (capped by available balance)"
            } else {
                ""
            }
        );
    }

    fn withdraw(&mut self, rest: &str) {
        self.workspace.open_modal(ActiveModal::Withdrawals);
        let (amount, destination) = match rest.split_once(' ') {
            Some((a, d)) => (a, Some(d.trim())),
            None => (rest, None),
        };
        let request = WithdrawalRequest::from_form(amount, destination);
        match self.treasury.submit(&request, today_eastern()) {
            Ok(rec) => println!(
                "Queued {} for ${:.2} to {} ({})",
                rec.id, rec.amount, rec.destination, rec.transaction_id
            ),
            Err(e) => println!("{}", e),
        }
    }

    fn show_history(&mut self, rest: &str) {
        self.workspace.open_modal(ActiveModal::Withdrawals);
        let status = match rest.to_lowercase().as_str() {
            "pending" => Some(WithdrawalStatus::Pending),
            "completed" => Some(WithdrawalStatus::Completed),
            _ => None,
        };
        for w in self.treasury.history(status) {
            println!(
                "{} {} ${:>10.2} (net ${:.2}) {:<9} {} ({})",
                w.id,
                w.date,
                w.amount,
                w.net_amount(),
                w.status,
                w.destination,
                w.transaction_id
            );
        }
        println!(
            "Completed ${:.2} | pending ${:.2} | fees ${:.2}",
            self.treasury.total_completed(),
            self.treasury.total_pending(),
            self.treasury.total_fees()
        );
    }

    async fn start_waiting(&mut self, rest: &str) {
        let cfg = self.config.read().await;
        let minutes = rest.parse().unwrap_or(cfg.waiting_period_minutes);
        let tick = cfg.countdown_tick();
        drop(cfg);

        // Replacing the timer drops (and cancels) the previous one.
        let period = WaitingPeriod::begin(minutes, "Cool-down after trade cycle");
        self.waiting = Some(CountdownTimer::start(period, tick));
        self.show_waiting();
    }

    fn show_waiting(&self) {
        let period = self
            .waiting
            .as_ref()
            .map(|t| t.snapshot())
            .unwrap_or_default();
        println!(
            "{} | {} | {}m elapsed | {:.0}%",
            period.status_label(),
            period.remaining_label(),
            period.elapsed(),
            period.progress()
        );
    }

    /// Returns false when Ctrl+C arrives before the reply.
    async fn ask(&mut self, prompt: &str) -> bool {
        self.ask_until(prompt, tokio::signal::ctrl_c()).await
    }

    async fn ask_until<F: Future>(&mut self, prompt: &str, interrupt: F) -> bool {
        tokio::select! {
            _ = interrupt => {
                warn!("Interrupted while waiting for the assistant");
                return false;
            }
            reply = self.chat.send(prompt) => match reply {
                Ok(Some(reply)) => println!("assistant> {}", reply.content),
                Ok(None) => {}
                Err(e) => println!("assistant unavailable: {}", e),
            },
        }
        true
    }

    fn shutdown(&mut self) {
        info!("Shutting down desk");
        if let Some(mut timer) = self.waiting.take() {
            timer.cancel();
        }
        self.workspace.close_modal();
    }
}

fn today_eastern() -> NaiveDate {
    Utc::now().with_timezone(&Eastern).date_naive()
}
