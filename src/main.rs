use clap::Parser;
use clustree::{
    ALWAYS_SHOW_ALL_CLUSTERS, BitsetViews, ClusterBrowser, ClusterEvent, ClustreeError,
    DEFAULT_SEGMENT_SIZE, FilePrefs, FoldAction, MemoryPrefs, PreferenceStore, TOP, from_json,
};
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clustree")]
#[command(about = "Interactive hierarchical cluster browser", long_about = None)]
struct Cli {
    /// Clusters JSON file: { "<id>": { "documentIds": [..], "children": { .. } } }
    clusters: PathBuf,
    /// Number of documents in the companion list
    #[arg(long)]
    documents: usize,
    /// Children shown per page before a "more" control is inserted
    #[arg(long, default_value_t = DEFAULT_SEGMENT_SIZE)]
    segment_size: usize,
    /// Preference file; when the always-show-all flag is set there,
    /// segmentation is skipped entirely
    #[arg(long)]
    prefs: Option<PathBuf>,
}

fn main() -> Result<(), ClustreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.clusters)?;
    let clusters = from_json(&text)?;

    let mut prefs: Box<dyn PreferenceStore> = match &cli.prefs {
        Some(path) => Box::new(FilePrefs::open(path)?),
        None => Box::new(MemoryPrefs::new()),
    };
    let skip_segmentation = prefs.flag(ALWAYS_SHOW_ALL_CLUSTERS);

    let mut browser = ClusterBrowser::with_segmentation(
        &clusters,
        cli.documents,
        cli.segment_size,
        !skip_segmentation,
    );
    let mut views = BitsetViews::new(cli.documents);

    browser.subscribe(|event| match event {
        ClusterEvent::Selected { documents } => {
            println!("[clustree] selected: {} document(s) {:?}", documents.len(), documents)
        }
        ClusterEvent::SelectedTop => println!("[clustree] selected: top (all documents)"),
        ClusterEvent::Folded { node, action } => {
            println!("[clustree] folded: node {} ({:?})", node, action)
        }
        ClusterEvent::More { node } => println!("[clustree] more: node {}", node),
    });

    println!(
        "[clustree] {} cluster(s), {} document(s){}",
        browser.tree().len() - 1,
        browser.document_count(),
        if skip_segmentation {
            ", segmentation skipped by preference"
        } else {
            ""
        }
    );
    println!("[clustree] commands: select <id> | fold <id> [show|hide|toggle] | top | more <control> | all | remember | controls | visible | tree | quit");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "select" => match words.next() {
                Some(cluster) => {
                    if !browser.select_by_cluster(cluster, &mut views) {
                        println!("[clustree] unknown cluster: {}", cluster);
                    }
                }
                None => println!("[clustree] usage: select <id>"),
            },
            "fold" => {
                let Some(cluster) = words.next() else {
                    println!("[clustree] usage: fold <id> [show|hide|toggle]");
                    continue;
                };
                let action = match words.next() {
                    Some("show") => FoldAction::Show,
                    Some("hide") => FoldAction::Hide,
                    Some("toggle") | None => FoldAction::Toggle,
                    Some(other) => {
                        println!("[clustree] unknown fold action: {}", other);
                        continue;
                    }
                };
                match browser.tree().node_id(cluster) {
                    Some(node) => browser.set_fold(node, action, &mut views),
                    None => println!("[clustree] unknown cluster: {}", cluster),
                }
            }
            "top" => browser.select_top(&mut views),
            "more" => match words.next().and_then(|raw| raw.parse::<usize>().ok()) {
                Some(control) => browser.reveal_more(control),
                None => println!("[clustree] usage: more <control-id>"),
            },
            "all" => {
                if !browser.reveal_all() {
                    println!("[clustree] nothing to reveal");
                } else if browser.remember_offered() {
                    println!("[clustree] all clusters shown; `remember` saves this choice");
                }
            }
            "remember" => {
                if browser.remember_choice(prefs.as_mut())? {
                    println!("[clustree] saved");
                } else {
                    println!("[clustree] nothing to remember");
                }
            }
            "controls" => {
                if browser.controls().is_empty() {
                    println!("[clustree] no paging controls armed");
                }
                for control in browser.controls() {
                    println!(
                        "[clustree] control {}: node {} reveals children from {}",
                        control.id, control.node, control.start
                    );
                }
            }
            "visible" => {
                let indices: Vec<usize> = views.visible_indices().collect();
                println!("[clustree] {} visible document(s): {:?}", indices.len(), indices);
            }
            "tree" => print_tree(&browser),
            "quit" | "exit" => break,
            other => println!("[clustree] unknown command: {}", other),
        }
    }

    Ok(())
}

fn print_tree(browser: &ClusterBrowser) {
    fn walk(browser: &ClusterBrowser, node: usize, depth: usize) {
        let state = browser.tree().node(node);
        let mut flags = String::new();
        if state.selected {
            flags.push_str(" [selected]");
        }
        if state.folded {
            flags.push_str(" [folded]");
        }
        if !browser.tree().is_visible(node) && node != TOP {
            flags.push_str(" [hidden]");
        }
        println!("[clustree] {}{}{}", "  ".repeat(depth), state.cluster, flags);
        for &child in browser.tree().children(node) {
            walk(browser, child, depth + 1);
        }
    }
    walk(browser, TOP, 0);
}
