// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;

use rss::Channel;

use crate::error::FeedError;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Render the channel as a pretty-printed XML document
pub fn feed_to_string(channel: &Channel) -> Result<String, FeedError> {
    let buffer = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    // quick-xml output is valid UTF-8; fall back lossily rather than fail
    let body = String::from_utf8_lossy(&buffer);
    Ok(format!("{}\n{}\n", XML_DECLARATION, body))
}

/// Write the channel as a pretty-printed XML document to a file
pub fn write_feed(channel: &Channel, path: &Path) -> Result<(), FeedError> {
    let document = feed_to_string(channel)?;
    std::fs::write(path, document).map_err(|e| FeedError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
