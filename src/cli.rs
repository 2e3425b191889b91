use crate::app::App;
use crate::errors::AdsError;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "adgraph",
    version,
    about = "Command-line client for the Facebook Marketing Graph API"
)]
pub struct Cli {
    /// Access token for the Graph API; falls back to $FB_ACCESS_TOKEN.
    #[arg(long, global = true)]
    pub access_token: Option<String>,

    /// Print results to stdout (the default).
    #[arg(long, global = true, overrides_with = "no_output")]
    pub output: bool,

    /// Suppress result printing.
    #[arg(long, global = true)]
    pub no_output: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn output_enabled(&self) -> bool {
        self.output || !self.no_output
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the ad accounts visible to the token.
    GetAdAccount {
        #[arg(long)]
        fields: Option<String>,
    },
    /// Insights for the first ad account.
    GetAdAccountInsights {
        #[arg(long)]
        fields: Option<String>,
    },
    /// Insights for one campaign (defaults to the first campaign).
    GetCampaignInsights {
        #[arg(long)]
        campaign_id: Option<String>,
        #[arg(long)]
        fields: Option<String>,
    },
    /// List campaigns on the ad account.
    GetCampaigns {
        #[arg(long)]
        fields: Option<String>,
    },
    /// List adsets on the ad account.
    GetAdsets {
        #[arg(long)]
        fields: Option<String>,
    },
    /// List uploaded ad images.
    GetAdimages {
        #[arg(long)]
        fields: Option<String>,
    },
    /// List ads on the ad account.
    GetAds {
        #[arg(long)]
        fields: Option<String>,
    },
    /// List ad creatives on the ad account.
    GetAdcreatives {
        #[arg(long)]
        fields: Option<String>,
    },
    /// Create a campaign from a JSON definition.
    CreateCampaign {
        /// JSON object describing the campaign; `name` is required.
        #[arg(long)]
        definition: String,
    },
    /// Create an adset from a JSON definition.
    CreateAdset {
        /// JSON object describing the adset; `name` and `campaign_id` are required.
        #[arg(long)]
        definition: String,
    },
    /// Upload a local image file to the ad account.
    CreateAdimage {
        /// Path to the image file.
        #[arg(long)]
        image: PathBuf,
    },
    /// Create an ad creative, selecting an image interactively if needed.
    CreateAdcreative {
        #[arg(long)]
        page_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        image_hash: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        image_message: Option<String>,
    },
    /// Create an ad, selecting an adset and creative interactively if needed.
    CreateAd {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "creative_id")]
        creative_id: Option<String>,
        #[arg(long = "adset_id")]
        adset_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Generic Graph call with placeholder resolution and field narrowing.
    CallGql {
        /// URL template, e.g. `{campaign_id}/insights`.
        #[arg(long)]
        url: String,
        /// Comma separated field list to request.
        #[arg(long, default_value = "")]
        fields: String,
        /// JSON array of envelope keys to drill through, e.g. `["data"]`.
        #[arg(long)]
        filter: Option<String>,
        /// JSON object of pre-resolved placeholder ids.
        #[arg(long)]
        object_ids: Option<String>,
    },
}

pub async fn run() -> Result<(), AdsError> {
    let cli = Cli::parse();
    let output = cli.output_enabled();
    let app = App::initialize(cli.access_token.clone(), cli.verbose)?;

    match cli.command {
        Command::GetAdAccount { fields } => {
            app.ads
                .get_ad_account(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetAdAccountInsights { fields } => {
            app.ads
                .get_ad_account_insights(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetCampaignInsights {
            campaign_id,
            fields,
        } => {
            app.ads
                .get_campaign_insights(
                    campaign_id.as_deref(),
                    fields.as_deref().unwrap_or(""),
                    output,
                )
                .await?;
        }
        Command::GetCampaigns { fields } => {
            app.ads
                .get_campaigns(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetAdsets { fields } => {
            app.ads
                .get_adsets(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetAdimages { fields } => {
            app.ads
                .get_adimages(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetAds { fields } => {
            app.ads
                .get_ads(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::GetAdcreatives { fields } => {
            app.ads
                .get_adcreatives(fields.as_deref().unwrap_or(""), output)
                .await?;
        }
        Command::CreateCampaign { definition } => {
            app.create.create_campaign(&definition, output).await?;
        }
        Command::CreateAdset { definition } => {
            app.create.create_adset(&definition, output).await?;
        }
        Command::CreateAdimage { image } => {
            app.create.create_adimage(&image, output).await?;
        }
        Command::CreateAdcreative {
            page_id,
            name,
            image_hash,
            image_url,
            image_message,
        } => {
            app.create
                .create_adcreative(page_id, name, image_hash, image_url, image_message, output)
                .await?;
        }
        Command::CreateAd {
            status,
            creative_id,
            adset_id,
            name,
        } => {
            app.create
                .create_ad(status, creative_id, adset_id, name, output)
                .await?;
        }
        Command::CallGql {
            url,
            fields,
            filter,
            object_ids,
        } => {
            let filter = parse_filter(filter.as_deref())?;
            let mut object_ids = parse_object_ids(object_ids.as_deref())?;
            app.call
                .call(&url, &fields, &filter, &mut object_ids, output)
                .await?;
        }
    }
    Ok(())
}

fn parse_filter(raw: Option<&str>) -> Result<Vec<String>, AdsError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| AdsError::invalid_params(format!("--filter is not valid JSON: {}", err)))?;
    let items = value
        .as_array()
        .ok_or_else(|| AdsError::invalid_params("--filter must be a JSON array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AdsError::invalid_params("--filter must be a JSON array of strings")
            })
        })
        .collect()
}

fn parse_object_ids(raw: Option<&str>) -> Result<Map<String, Value>, AdsError> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    let value: Value = serde_json::from_str(raw).map_err(|err| {
        AdsError::invalid_params(format!("--object-ids is not valid JSON: {}", err))
    })?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| AdsError::invalid_params("--object-ids must be a JSON object"))
}
