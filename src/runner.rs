// src/runner.rs
//
// The five ISODISTORT round trips, in order. Each request body is built from
// the previous response only (plus the user's choice for that step).

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    config::{
        consts::{FILENAME_FIELD, INPUT_FIELD, PARENT_INPUT, UPLOAD_FILE_FIELD},
        options::{IsoOptions, Method, Selection},
    },
    core::{form::FormData, net::{HttpTransport, Transport}},
    error::{IsoError, Result},
    file::{archive_path, write_bytes, write_output},
    progress::{Progress, Step},
    specs::{display, distort, method, subgroup, upload},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Name the server gave the uploaded parent.
    pub server_filename: String,
    pub output: PathBuf,
    pub archives: Vec<PathBuf>,
    /// Archives that could not be fetched or saved; the run still succeeds.
    pub failed_archives: Vec<ArchiveFailure>,
    /// Body of the final request (what selected the output).
    pub fields: FormData,
}

#[derive(Debug)]
pub struct ArchiveFailure {
    pub reference: String,
    pub error: IsoError,
}

/// What the display step left on disk.
struct Downloaded {
    output: PathBuf,
    archives: Vec<PathBuf>,
    failed: Vec<ArchiveFailure>,
}

/// Run the whole pipeline with `transport`.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &IsoOptions,
    transport: &dyn Transport,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    opts.validate()?;
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Step::ALL.len());
    }

    let result = run_steps(opts, transport, &mut progress);

    if let Some(p) = progress.as_deref_mut() {
        if let Err(e) = &result {
            p.log(&format!("failed: {e}"));
        }
        p.finish();
    }
    result
}

/// `run` over a fresh `HttpTransport` built from the options' timeout.
pub fn run_default(opts: &IsoOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let transport = HttpTransport::new(Duration::from_secs(opts.timeout_secs))?;
    run(opts, &transport, progress)
}

/// Steps 1 and 2 for method 3, then the captions of the offered distortions.
pub fn list_distortions(opts: &IsoOptions, transport: &dyn Transport) -> Result<Vec<String>> {
    if opts.method != Method::Subgroup {
        return Err(IsoError::option("only method 3 offers a distortion list"));
    }
    let mut progress: Option<&mut dyn Progress> = None;
    let fname = upload_parent(opts, transport, &mut progress)?;
    let fields = choose_method(opts, transport, &fname, &mut progress)?;

    let url = &opts.endpoints.form_url;
    let doc = transport.post_form(url, &fields)?;
    check_page(Step::Subgroup, &doc)?;
    let list = subgroup::options(&doc)?;
    logf!("{}: {} distortion(s) offered", Step::Subgroup, list.len());
    Ok(list)
}

/* ---------------- Steps ---------------- */

fn run_steps(
    opts: &IsoOptions,
    transport: &dyn Transport,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let server_filename = upload_parent(opts, transport, progress)?;
    let method_fields = choose_method(opts, transport, &server_filename, progress)?;
    let subgroup_fields = choose_distortion(opts, transport, &method_fields, progress)?;
    let display_fields = choose_format(opts, transport, &subgroup_fields, progress)?;
    let done = download(opts, transport, &display_fields, progress)?;

    Ok(RunSummary {
        server_filename,
        output: done.output,
        archives: done.archives,
        failed_archives: done.failed,
        fields: display_fields,
    })
}

fn upload_parent(
    opts: &IsoOptions,
    transport: &dyn Transport,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<String> {
    let url = &opts.endpoints.upload_url;
    logf!("{}: {} -> {url}", Step::Upload, opts.parent.display());

    let doc = transport.upload(url, &FormData::new(), UPLOAD_FILE_FIELD, &opts.parent)?;
    check_page(Step::Upload, &doc)?;
    let fname = upload::server_filename(&doc)?;

    logd!("{}: server filename {fname:?}", Step::Upload);
    step_done(progress, Step::Upload, &format!("uploaded as {fname}"));
    Ok(fname)
}

fn choose_method(
    opts: &IsoOptions,
    transport: &dyn Transport,
    server_filename: &str,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<FormData> {
    let url = &opts.endpoints.form_url;
    let body = form! {
        FILENAME_FIELD => server_filename,
        INPUT_FIELD => PARENT_INPUT,
    };
    logf!("{}: method {} -> {url}", Step::Method, opts.method.number());

    let doc = transport.post_form(url, &body)?;
    check_page(Step::Method, &doc)?;
    let fields = method::collect(&doc, opts.method, &opts.overrides)?;

    log_fields(Step::Method, &fields);
    step_done(progress, Step::Method, &format!("{} field(s)", fields.len()));
    Ok(fields)
}

fn choose_distortion(
    opts: &IsoOptions,
    transport: &dyn Transport,
    method_fields: &FormData,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<FormData> {
    let fields = match &opts.selection {
        Selection::Ordinal(n) => {
            let url = &opts.endpoints.form_url;
            logf!("{}: distortion #{n} -> {url}", Step::Subgroup);
            let doc = transport.post_form(url, method_fields)?;
            check_page(Step::Subgroup, &doc)?;
            subgroup::select(&doc, *n)?
        }
        Selection::Structure(path) => {
            let url = &opts.endpoints.upload_url;
            logf!("{}: {} -> {url}", Step::Subgroup, path.display());
            let doc = transport.upload(url, method_fields, UPLOAD_FILE_FIELD, path)?;
            check_page(Step::Subgroup, &doc)?;
            subgroup::structure_form(&doc)?
        }
    };

    log_fields(Step::Subgroup, &fields);
    step_done(progress, Step::Subgroup, &format!("{} field(s)", fields.len()));
    Ok(fields)
}

fn choose_format(
    opts: &IsoOptions,
    transport: &dyn Transport,
    subgroup_fields: &FormData,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<FormData> {
    let url = &opts.endpoints.form_url;
    logf!("{}: format {} -> {url}", Step::Distort, opts.format);

    let doc = transport.post_form(url, subgroup_fields)?;
    check_page(Step::Distort, &doc)?;
    let fields = distort::collect(&doc, opts.format)?;

    log_fields(Step::Distort, &fields);
    step_done(progress, Step::Distort, &format!("{} field(s)", fields.len()));
    Ok(fields)
}

fn download(
    opts: &IsoOptions,
    transport: &dyn Transport,
    display_fields: &FormData,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<Downloaded> {
    let url = &opts.endpoints.form_url;
    logf!("{}: -> {url}", Step::Display);

    let doc = transport.post_form(url, display_fields)?;
    check_page(Step::Display, &doc)?;

    let output = write_output(&opts.out_path(), &doc)?;
    logf!("{}: wrote {} ({} bytes)", Step::Display, output.display(), doc.len());

    let (archives, failed) = if opts.fetch_archives {
        fetch_archives(opts, transport, &doc, &output)
    } else {
        (Vec::new(), Vec::new())
    };

    let msg = match failed.len() {
        0 => format!("wrote {}", output.display()),
        n => format!("wrote {} ({n} archive(s) failed)", output.display()),
    };
    step_done(progress, Step::Display, &msg);
    Ok(Downloaded { output, archives, failed })
}

/// Fetch every archive the output links to. A failed archive is logged and
/// reported, never fatal: the output itself is already on disk.
fn fetch_archives(
    opts: &IsoOptions,
    transport: &dyn Transport,
    doc: &str,
    output: &Path,
) -> (Vec<PathBuf>, Vec<ArchiveFailure>) {
    let names = display::archive_names(doc);
    if names.is_empty() {
        logd!("{}: output references no archives", Step::Display);
        return (Vec::new(), Vec::new());
    }

    let dir = output.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut seen_names: HashMap<String, usize> = HashMap::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut written = Vec::with_capacity(names.len());
    let mut failed = Vec::new();

    for name in names {
        let fetched = display::archive_url(&opts.endpoints.base_url, &name).and_then(|url| {
            if !seen_urls.insert(url.clone()) {
                logd!("{}: {url} already fetched", Step::Display);
                return Ok(None);
            }
            let bytes = transport.fetch(&url)?;
            let path = write_bytes(&archive_path(&dir, &name, &mut seen_names), &bytes)?;
            logf!("{}: archive {url} -> {} ({} bytes)", Step::Display, path.display(), bytes.len());
            Ok(Some(path))
        });

        match fetched {
            Ok(Some(path)) => written.push(path),
            Ok(None) => {}
            Err(error) => {
                logw!("{}: archive {name} skipped: {error}", Step::Display);
                failed.push(ArchiveFailure { reference: name, error });
            }
        }
    }
    (written, failed)
}

/* ---------------- Helpers ---------------- */

fn check_page(step: Step, doc: &str) -> Result<()> {
    match display::server_error(doc) {
        Some(message) => {
            loge!("{step}: server error page: {message}");
            Err(IsoError::Server { step, message })
        }
        None => Ok(()),
    }
}

fn log_fields(step: Step, fields: &FormData) {
    logd!("{step}: {} field(s)", fields.len());
    for (k, v) in fields.iter() {
        logd!("  {k} = {v:?}");
    }
}

fn step_done(progress: &mut Option<&mut dyn Progress>, step: Step, msg: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{step}: {msg}"));
        p.step_done(step);
    }
}
