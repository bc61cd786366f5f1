use std::pin::Pin;

/// Serial port stand-in for tests.
///
/// Plays back scripted reply lines and swallows everything written to it.
/// A `silent` port never completes a read, like an instrument that stopped
/// talking; an exhausted scripted port signals end-of-stream.
pub(crate) struct FakePort {
    replies: Vec<u8>,
    silent: bool,
}

impl FakePort {
    pub(crate) fn replies(lines: &[&str]) -> Self {
        let mut replies = Vec::new();
        for line in lines {
            replies.extend_from_slice(line.as_bytes());
            replies.extend_from_slice(b"\r\n");
        }
        Self {
            replies,
            silent: false,
        }
    }

    pub(crate) fn silent() -> Self {
        Self {
            replies: Vec::new(),
            silent: true,
        }
    }
}

impl tokio::io::AsyncRead for FakePort {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        if self.replies.is_empty() && self.silent {
            // No waker bookkeeping: the read timeout ends the wait.
            return std::task::Poll::Pending;
        }
        if !self.replies.is_empty() {
            let c = self.replies.len().min(buf.remaining());
            buf.put_slice(&self.replies[0..c]);
            self.replies.drain(0..c);
        }
        std::task::Poll::Ready(Ok(()))
    }
}

impl tokio::io::AsyncWrite for FakePort {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::result::Result<usize, std::io::Error>> {
        std::task::Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), std::io::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn poll_shutdown(
        self: Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), std::io::Error>> {
        std::task::Poll::Ready(Ok(()))
    }
}
