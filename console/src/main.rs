use std::{fs, io, process::ExitCode, sync::OnceLock};

use console::{args::Action, render, Args, Config, Controller, Logger};
use service::{
    command::{
        create_contract, save_contract, CreateContract, DeleteContract,
        GenerateDocument, LoadContracts, SaveContract,
    },
    domain::{contract::Candidate, employee, position},
    infra::Http,
    query::{ActivePositions, ContractById},
    validation::FieldErrors,
    Command as _, Query as _,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, action } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        backend,
        session,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&backend.into()).map_err(|e| {
        log::error!("failed to initialize `Http` backend: {e}");
    })?;
    let ctrl = Controller::new(http, Logger, session.into());

    match action {
        Action::Contracts { employee } => {
            load(&ctrl, employee).await?;
            print!("{}", render::forest(&ctrl.forest()));
        }
        Action::Positions => {
            print!("{}", render::positions(&positions(&ctrl).await?));
        }
        Action::Create {
            employee,
            parent,
            name,
            terms,
        } => {
            ctrl.replace_positions(positions(&ctrl).await?);
            load(&ctrl, employee).await?;
            let created = ctrl
                .execute(CreateContract {
                    candidate: Candidate {
                        name,
                        ..terms.apply(Candidate::default())
                    },
                    parent_id: parent,
                })
                .await
                .map_err(|e| match e.as_ref() {
                    create_contract::ExecutionError::Invalid(errors) => {
                        invalid(errors);
                    }
                    create_contract::ExecutionError::Backend(_)
                    | create_contract::ExecutionError::NoEmployeeSelected
                    | create_contract::ExecutionError::ParentIsAmendment(_) => {
                        log::error!("failed to create contract: {e}");
                    }
                })?;
            log::info!("created contract #{}", created.id);
            print!("{}", render::forest(&ctrl.forest()));
        }
        Action::Update {
            employee,
            contract,
            terms,
        } => {
            ctrl.replace_positions(positions(&ctrl).await?);
            load(&ctrl, employee).await?;
            let Ok(Some(current)) = ctrl.execute(ContractById(contract)).await
            else {
                log::error!("contract #{contract} is not found");
                return Err(());
            };
            ctrl.execute(SaveContract {
                id: contract,
                candidate: terms.apply(Candidate::from(&current)),
            })
            .await
            .map_err(|e| match e.as_ref() {
                save_contract::ExecutionError::Invalid(errors) => {
                    invalid(errors);
                }
                save_contract::ExecutionError::Backend(_) => {
                    log::error!("failed to save contract: {e}");
                }
            })?;
            print!("{}", render::forest(&ctrl.forest()));
        }
        Action::Delete { employee, contract } => {
            load(&ctrl, employee).await?;
            ctrl.execute(DeleteContract(contract)).await.map_err(|e| {
                log::error!("failed to delete contract: {e}");
            })?;
            print!("{}", render::forest(&ctrl.forest()));
        }
        Action::Document { contract, output } => {
            let document =
                ctrl.execute(GenerateDocument(contract)).await.map_err(|e| {
                    log::error!("failed to generate document: {e}");
                })?;
            let path = output.join(
                document
                    .file_name
                    .unwrap_or_else(|| format!("contract_{contract}.pdf")),
            );
            fs::write(&path, &document.content).map_err(|e| {
                log::error!("failed to write `{}`: {e}", path.display());
            })?;
            log::info!("document written to `{}`", path.display());
        }
    }

    Ok(())
}

/// Loads the contracts of the provided employee.
async fn load(ctrl: &Controller, employee: employee::Id) -> Result<(), ()> {
    _ = ctrl
        .execute(LoadContracts(Some(employee)))
        .await
        .map_err(|e| {
            log::error!("failed to load contracts: {e}");
        })?;
    Ok(())
}

/// Fetches the positions open for hiring.
async fn positions(ctrl: &Controller) -> Result<position::Catalog, ()> {
    ctrl.execute(ActivePositions::by(position::Active))
        .await
        .map_err(|e| {
            log::error!("failed to load positions: {e}");
        })
}

/// Reports the provided [`FieldErrors`].
fn invalid(errors: &FieldErrors) {
    for line in render::field_errors(errors).lines() {
        log::error!("{line}");
    }
}
