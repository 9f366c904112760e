//! Entry point for running searches.

use log::info;

use crate::config::TwitterConfig;
use crate::error::{Result, TweezersError};
use crate::sentiment::{LexiconAnalyzer, SentimentAnalyzer};
use crate::twitter::{SearchParams, TweezerAuth, TweezerSearch};

/// Runs Twitter searches with one set of credentials and remembers them.
///
/// # Example
///
/// ```rust,no_run
/// use tweezers::{SearchParams, Tweezers, TwitterConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let mut tweezers = Tweezers::new(TwitterConfig::from_env()?).await?;
///     let search = tweezers.search(SearchParams::new("rustlang").total(300)).await?;
///     println!("{}", search.table());
///     Ok(())
/// }
/// ```
pub struct Tweezers {
    auth: TweezerAuth,
    analyzer: Box<dyn SentimentAnalyzer>,
    search_history: Vec<TweezerSearch>,
}

impl Tweezers {
    /// Creates a client, verifying the credentials once.
    ///
    /// Credentials for a Twitter app can be obtained from
    /// <https://developer.twitter.com/en/apps/>.
    pub async fn new(config: TwitterConfig) -> Result<Self> {
        let auth = TweezerAuth::new(config).await?;
        info!("{}", auth);
        Ok(Tweezers {
            auth,
            analyzer: Box::new(LexiconAnalyzer::new()),
            search_history: Vec::new(),
        })
    }

    /// Replaces the sentiment model applied to search results.
    pub fn with_analyzer(mut self, analyzer: impl SentimentAnalyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Runs a search and adds it to the search history.
    pub async fn search(&mut self, params: SearchParams) -> Result<&TweezerSearch> {
        let search = TweezerSearch::run(&self.auth, params, self.analyzer.as_ref()).await?;
        self.search_history.push(search);
        self.search_history.last().ok_or(TweezersError::NoResults)
    }

    /// Every successful search, oldest first.
    pub fn search_history(&self) -> &[TweezerSearch] {
        &self.search_history
    }

    pub fn auth(&self) -> &TweezerAuth {
        &self.auth
    }
}
