//! Filmoteca CLI — command-line admin client for the film catalog.
//!
//! Set SUPABASE_URL and SUPABASE_ANON_KEY; optionally MIRROR_ENDPOINT,
//! MIRROR_BUCKET, and TMDB_API_KEY.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use filmoteca_cli::{content_type_for, init_tracing, parse_sort};
use filmoteca_core::constants::PAGE_SIZES;
use filmoteca_core::models::{ColumnFilter, QuerySpec, Tab};
use filmoteca_core::PanelConfig;
use filmoteca_db::{BannerRepository, FilmRepository, SupabaseClient, VisitsRepository};
use filmoteca_panel::{
    BannerService, BulkDeleter, DashboardService, FetchOutcome, FilmDraft, MetadataClient,
    PosterChange, PosterLifecycle, QueryEngine, SaveWorkflow,
};
use filmoteca_storage::{MirrorStore, ObjectStore, SupabaseStorage};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "filmoteca", about = "Film catalog admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog records for a tab, with search, filters, and paging
    List {
        /// Tab label ("Culto" or a subtype such as "Pelicula")
        #[arg(long, default_value = "Pelicula")]
        tab: String,
        /// Free-text search over title, year, and brand
        #[arg(long, default_value = "")]
        search: String,
        /// Column filter as column=value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,
        /// Sort key as column, column.asc, or column.desc (repeatable)
        #[arg(long = "sort")]
        sorts: Vec<String>,
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,
        /// Rows per page
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Get a single record by id
    Get {
        id: String,
    },
    /// Create a record
    Create {
        #[command(flatten)]
        fields: RecordFields,
        /// Record title
        #[arg(long)]
        title: String,
    },
    /// Edit a record; only the given flags change
    Edit {
        id: String,
        #[command(flatten)]
        fields: RecordFields,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// Remove the poster
        #[arg(long)]
        clear_poster: bool,
    },
    /// Delete records (posters included), continuing past failures
    Delete {
        ids: Vec<String>,
    },
    /// Duplicate a record under a copy title
    Duplicate {
        id: String,
    },
    /// Toggle the premiere flag
    Premiere {
        id: String,
        /// Turn the flag off instead of on
        #[arg(long)]
        off: bool,
    },
    /// Homepage banner operations
    Banner {
        #[command(subcommand)]
        sub: BannerCommands,
    },
    /// Visits dashboard
    Dashboard {
        /// Keep refreshing the active-visitors counter
        #[arg(long)]
        watch: bool,
    },
    /// Search the movie-metadata API
    Metadata {
        query: String,
        /// 1-based result page
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

#[derive(Subcommand)]
enum BannerCommands {
    /// List the banner set
    List,
    /// Replace a banner's image with a local file
    Replace {
        /// Banner id
        id: String,
        /// Path to the image file
        file: std::path::PathBuf,
    },
}

/// Record fields shared by create and edit.
#[derive(clap::Args)]
struct RecordFields {
    /// Release year
    #[arg(long)]
    year: Option<String>,
    /// Subtype tag (repeatable)
    #[arg(long = "type")]
    types: Vec<String>,
    /// Mark as a cult edition
    #[arg(long)]
    cult: bool,
    /// Boutique brand (cult editions only)
    #[arg(long)]
    brand: Option<String>,
    /// Genre tag (repeatable)
    #[arg(long = "genre")]
    genres: Vec<String>,
    /// Number of disks
    #[arg(long)]
    disks: Option<i32>,
    /// Mark as a special edition
    #[arg(long)]
    special: bool,
    /// Mark as a premiere
    #[arg(long)]
    premiere: bool,
    /// Original language
    #[arg(long)]
    language: Option<String>,
    /// Audio track language
    #[arg(long)]
    audio: Option<String>,
    /// Subtitle language
    #[arg(long)]
    subs: Option<String>,
    /// Path to a poster image to upload
    #[arg(long)]
    poster: Option<std::path::PathBuf>,
    /// Externally-hosted poster URL (no upload)
    #[arg(long)]
    poster_url: Option<String>,
}

impl RecordFields {
    /// Overlay these fields onto a draft. Flags left unset keep the draft's
    /// current values; list flags replace the whole list when given.
    fn apply(self, draft: &mut FilmDraft) -> anyhow::Result<()> {
        if let Some(year) = self.year {
            draft.year_film = Some(year);
        }
        if !self.types.is_empty() {
            draft.film_type = self.types;
        }
        if self.cult {
            draft.cult_film = true;
        }
        if let Some(brand) = self.brand {
            draft.cult_film = true;
            draft.cult_brand = Some(brand);
        }
        if !self.genres.is_empty() {
            draft.genres_list = self.genres;
        }
        if let Some(disks) = self.disks {
            draft.q_disks = disks;
        }
        if self.special {
            draft.special_edittion = true;
        }
        if self.premiere {
            draft.is_premiere = true;
        }
        if let Some(language) = self.language {
            draft.original_language = Some(language);
        }
        if let Some(audio) = self.audio {
            draft.audio = Some(audio);
        }
        if let Some(subs) = self.subs {
            draft.subs = Some(subs);
        }

        match (self.poster, self.poster_url) {
            (Some(_), Some(_)) => {
                anyhow::bail!("--poster and --poster-url are mutually exclusive")
            }
            (Some(path), None) => {
                let data = std::fs::read(&path)
                    .with_context(|| format!("read poster file {}", path.display()))?;
                draft.poster_change = PosterChange::Upload {
                    data,
                    content_type: content_type_for(&path).to_string(),
                };
            }
            (None, Some(url)) => {
                draft.poster_change = PosterChange::External { url };
            }
            (None, None) => {}
        }
        Ok(())
    }
}

fn parse_column_filter(arg: &str) -> anyhow::Result<ColumnFilter> {
    let (column, value) = arg
        .split_once('=')
        .context("filters take the form column=value")?;
    Ok(ColumnFilter {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

struct App {
    config: PanelConfig,
    films: Arc<FilmRepository>,
    banners: Arc<BannerRepository>,
    visits: Arc<VisitsRepository>,
    storage: Arc<SupabaseStorage>,
    mirror: Option<Arc<MirrorStore>>,
}

impl App {
    fn from_env() -> anyhow::Result<Self> {
        let config = PanelConfig::from_env()
            .context("Failed to load config. Set SUPABASE_URL and SUPABASE_ANON_KEY")?;
        let client = SupabaseClient::from_config(&config)?;
        let storage = Arc::new(SupabaseStorage::from_config(&config)?);
        let mirror = MirrorStore::from_config(&config)?.map(Arc::new);
        Ok(Self {
            films: Arc::new(FilmRepository::new(client.clone())),
            banners: Arc::new(BannerRepository::new(client.clone())),
            visits: Arc::new(VisitsRepository::new(client)),
            config,
            storage,
            mirror,
        })
    }

    fn posters(&self) -> PosterLifecycle {
        PosterLifecycle::new(self.storage.clone())
    }

    fn save_workflow(&self) -> SaveWorkflow {
        SaveWorkflow::new(self.films.clone(), self.posters())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let app = App::from_env()?;

    match cli.command {
        Commands::List {
            tab,
            search,
            filters,
            sorts,
            page,
            page_size,
        } => {
            if let Some(size) = page_size {
                anyhow::ensure!(
                    PAGE_SIZES.contains(&size),
                    "page size must be one of {:?}",
                    PAGE_SIZES
                );
            }
            let mut spec = QuerySpec::new(
                Tab::from_label(&tab),
                page_size.unwrap_or(app.config.default_page_size),
            );
            spec.search = search;
            spec.filters = filters
                .iter()
                .map(|f| parse_column_filter(f))
                .collect::<anyhow::Result<_>>()?;
            spec.sort = sorts.iter().map(|s| parse_sort(s)).collect();
            spec.page = page;

            let engine = QueryEngine::new(app.films.clone());
            match engine.fetch(&spec).await {
                FetchOutcome::Page(result) => {
                    if let Some(error) = &result.error {
                        anyhow::bail!("fetch failed: {}", error);
                    }
                    print_json(&serde_json::json!({
                        "rows": result.rows,
                        "total_count": result.total_count,
                        "total_pages": result.total_pages(spec.page_size),
                        "page": spec.page,
                    }))?;
                }
                FetchOutcome::Stale => anyhow::bail!("fetch was superseded"),
            }
        }
        Commands::Get { id } => {
            let film = app
                .films
                .get(&id)
                .await?
                .with_context(|| format!("film {} not found", id))?;
            print_json(&film)?;
        }
        Commands::Create { fields, title } => {
            let mut draft = FilmDraft::default();
            draft.title = title;
            fields.apply(&mut draft)?;

            let report = app.save_workflow().submit(&draft).await;
            print_warnings(&report.warnings);
            if let Some(error) = report.error {
                anyhow::bail!("save failed: {}", error);
            }
            print_json(&report.film)?;
        }
        Commands::Edit {
            id,
            fields,
            title,
            clear_poster,
        } => {
            let film = app
                .films
                .get(&id)
                .await?
                .with_context(|| format!("film {} not found", id))?;
            let mut draft = FilmDraft::from_film(&film);
            if let Some(title) = title {
                draft.title = title;
            }
            fields.apply(&mut draft)?;
            if clear_poster {
                draft.poster_change = PosterChange::Clear;
            }

            let report = app.save_workflow().submit(&draft).await;
            print_warnings(&report.warnings);
            if let Some(error) = report.error {
                anyhow::bail!("save failed: {}", error);
            }
            print_json(&report.film)?;
        }
        Commands::Delete { ids } => {
            let mut films = Vec::new();
            for id in &ids {
                let film = app
                    .films
                    .get(id)
                    .await?
                    .with_context(|| format!("film {} not found", id))?;
                films.push(film);
            }
            let deleter = BulkDeleter::new(app.films.clone(), app.posters());
            let summary = deleter.delete_all(&films).await;
            print_warnings(&summary.warnings);
            print_json(&serde_json::json!({
                "deleted": summary.deleted,
                "failed": summary.failed,
            }))?;
        }
        Commands::Duplicate { id } => {
            let copy = app.films.duplicate(&id).await?;
            print_json(&copy)?;
        }
        Commands::Premiere { id, off } => {
            let film = app.films.set_premiere(&id, !off).await?;
            print_json(&film)?;
        }
        Commands::Banner { sub } => {
            let service = BannerService::new(
                app.banners.clone(),
                app.storage.clone(),
                app.mirror.clone().map(|m| m as Arc<dyn ObjectStore>),
            );
            match sub {
                BannerCommands::List => {
                    let banners = service.list().await?;
                    print_json(&banners)?;
                }
                BannerCommands::Replace { id, file } => {
                    let banners = service.list().await?;
                    let banner = banners
                        .iter()
                        .find(|b| b.id == id)
                        .with_context(|| format!("banner {} not found", id))?;
                    let filename = file
                        .file_name()
                        .and_then(|n| n.to_str())
                        .context("poster path has no filename")?
                        .to_string();
                    let data = std::fs::read(&file)
                        .with_context(|| format!("read image file {}", file.display()))?;

                    let report = service
                        .replace_image(banner, &filename, data, content_type_for(&file))
                        .await?;
                    print_warnings(&report.warnings);
                    print_json(&report.banner)?;
                }
            }
        }
        Commands::Dashboard { watch } => {
            let service = Arc::new(DashboardService::new(app.visits.clone()));
            let dashboard = service.load().await?;
            print_json(&dashboard)?;

            if watch {
                let period = Duration::from_secs(app.config.active_visits_poll_secs);
                let poller = service.spawn_active_poller(period);
                loop {
                    tokio::time::sleep(period).await;
                    let snapshot = service.snapshot().await;
                    if let Some(summary) = snapshot.resumen {
                        println!("active visitors: {}", summary.visitas_activas);
                    }
                    if poller.is_finished() {
                        break;
                    }
                }
            }
        }
        Commands::Metadata { query, page } => {
            let api_key = app
                .config
                .metadata_api_key
                .clone()
                .context("TMDB_API_KEY is not set")?;
            let client = MetadataClient::new(api_key);
            let results = client.search(&query, page).await?;
            print_json(&serde_json::json!({
                "page": results.page,
                "total_pages": results.total_pages,
                "total_results": results.total_results,
                "results": results.results.iter().map(|m| serde_json::json!({
                    "id": m.id,
                    "title": m.title,
                    "year": m.year,
                    "poster_url": m.poster_url,
                })).collect::<Vec<_>>(),
            }))?;
        }
    }

    Ok(())
}
