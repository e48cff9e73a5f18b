//! Types shared by every poller backend.

/// The set of readiness conditions a registration cares about.
///
/// Edge-triggered backends (see [`super::epoll`]) always monitor the
/// peer-hangup condition in addition to whatever is requested here, since a
/// half-closed peer must still wake a pending read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Interest {
    pub(crate) read: bool,
    pub(crate) write: bool,
}

impl Interest {
    pub(crate) const READ: Interest = Interest {
        read: true,
        write: false,
    };

    pub(crate) const READ_WRITE: Interest = Interest {
        read: true,
        write: true,
    };
}
