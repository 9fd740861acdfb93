use crate::boxes::FourCC;

/// Typed view over the ISO-BMFF boxes the walker knows about.
///
/// Anything not in this list becomes `KnownBox::Unknown(fourcc)` and is
/// always treated as a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // File-level
    Ftyp,
    Pdin,
    Moov,
    Moof,
    Mfra,
    Mdat,
    Free,
    Skip,

    // moov / trak
    Mvhd,
    Trak,
    Tkhd,
    Tref,
    Edts,
    Elst,
    Ipmc,

    // mdia / minf
    Mdia,
    Mdhd,
    Hdlr,
    Minf,
    Vmhd,
    Smhd,
    Hmhd,
    Nmhd,
    Dinf,
    Dref,

    // stbl
    Stbl,
    Stsd,
    Stts,
    Ctts,
    Stsc,
    Stsz,
    Stz2,
    Stco,
    Co64,
    Stss,
    Stsh,
    Padb,
    Stdp,
    Sdtp,
    Sbgp,
    Sgpd,
    Subs,

    // fragmented
    Mvex,
    Mehd,
    Trex,
    Mfhd,
    Traf,
    Trun,
    Tfra,
    Mfro,

    // Anything else
    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"pdin" => KnownBox::Pdin,
            b"moov" => KnownBox::Moov,
            b"moof" => KnownBox::Moof,
            b"mfra" => KnownBox::Mfra,
            b"mdat" => KnownBox::Mdat,
            b"free" => KnownBox::Free,
            b"skip" => KnownBox::Skip,

            b"mvhd" => KnownBox::Mvhd,
            b"trak" => KnownBox::Trak,
            b"tkhd" => KnownBox::Tkhd,
            b"tref" => KnownBox::Tref,
            b"edts" => KnownBox::Edts,
            b"elst" => KnownBox::Elst,
            b"ipmc" => KnownBox::Ipmc,

            b"mdia" => KnownBox::Mdia,
            b"mdhd" => KnownBox::Mdhd,
            b"hdlr" => KnownBox::Hdlr,
            b"minf" => KnownBox::Minf,
            b"vmhd" => KnownBox::Vmhd,
            b"smhd" => KnownBox::Smhd,
            b"hmhd" => KnownBox::Hmhd,
            b"nmhd" => KnownBox::Nmhd,
            b"dinf" => KnownBox::Dinf,
            b"dref" => KnownBox::Dref,

            b"stbl" => KnownBox::Stbl,
            b"stsd" => KnownBox::Stsd,
            b"stts" => KnownBox::Stts,
            b"ctts" => KnownBox::Ctts,
            b"stsc" => KnownBox::Stsc,
            b"stsz" => KnownBox::Stsz,
            b"stz2" => KnownBox::Stz2,
            b"stco" => KnownBox::Stco,
            b"co64" => KnownBox::Co64,
            b"stss" => KnownBox::Stss,
            b"stsh" => KnownBox::Stsh,
            b"padb" => KnownBox::Padb,
            b"stdp" => KnownBox::Stdp,
            b"sdtp" => KnownBox::Sdtp,
            b"sbgp" => KnownBox::Sbgp,
            b"sgpd" => KnownBox::Sgpd,
            b"subs" => KnownBox::Subs,

            b"mvex" => KnownBox::Mvex,
            b"mehd" => KnownBox::Mehd,
            b"trex" => KnownBox::Trex,
            b"mfhd" => KnownBox::Mfhd,
            b"traf" => KnownBox::Traf,
            b"trun" => KnownBox::Trun,
            b"tfra" => KnownBox::Tfra,
            b"mfro" => KnownBox::Mfro,

            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Is the payload of this box a sequence of child boxes?
    ///
    /// `skip` is walked like a container; `edts`, `tref` and `stsd` are not.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            KnownBox::Moov
                | KnownBox::Trak
                | KnownBox::Mdia
                | KnownBox::Minf
                | KnownBox::Dinf
                | KnownBox::Stbl
                | KnownBox::Mvex
                | KnownBox::Ipmc
                | KnownBox::Moof
                | KnownBox::Traf
                | KnownBox::Mfra
                | KnownBox::Skip
        )
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            KnownBox::Ftyp => "File Type Box",
            KnownBox::Pdin => "Progressive Download Information Box",
            KnownBox::Moov => "Movie Box",
            KnownBox::Moof => "Movie Fragment Box",
            KnownBox::Mfra => "Movie Fragment Random Access Box",
            KnownBox::Mdat => "Media Data Box",
            KnownBox::Free => "Free Space Box",
            KnownBox::Skip => "Free Space Box (skip)",

            KnownBox::Mvhd => "Movie Header Box",
            KnownBox::Trak => "Track Box",
            KnownBox::Tkhd => "Track Header Box",
            KnownBox::Tref => "Track Reference Box",
            KnownBox::Edts => "Edit Box",
            KnownBox::Elst => "Edit List Box",
            KnownBox::Ipmc => "IPMP Control Box",

            KnownBox::Mdia => "Media Box",
            KnownBox::Mdhd => "Media Header Box",
            KnownBox::Hdlr => "Handler Reference Box",
            KnownBox::Minf => "Media Information Box",
            KnownBox::Vmhd => "Video Media Header Box",
            KnownBox::Smhd => "Sound Media Header Box",
            KnownBox::Hmhd => "Hint Media Header Box",
            KnownBox::Nmhd => "Null Media Header Box",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Dref => "Data Reference Box",

            KnownBox::Stbl => "Sample Table Box",
            KnownBox::Stsd => "Sample Description Box",
            KnownBox::Stts => "Decoding Time to Sample Box",
            KnownBox::Ctts => "Composition Time to Sample Box",
            KnownBox::Stsc => "Sample To Chunk Box",
            KnownBox::Stsz => "Sample Size Box",
            KnownBox::Stz2 => "Compact Sample Size Box",
            KnownBox::Stco => "Chunk Offset Box",
            KnownBox::Co64 => "64-bit Chunk Offset Box",
            KnownBox::Stss => "Sync Sample Box",
            KnownBox::Stsh => "Shadow Sync Sample Box",
            KnownBox::Padb => "Padding Bits Box",
            KnownBox::Stdp => "Degradation Priority Box",
            KnownBox::Sdtp => "Independent and Disposable Samples Box",
            KnownBox::Sbgp => "Sample to Group Box",
            KnownBox::Sgpd => "Sample Group Description Box",
            KnownBox::Subs => "Sub-Sample Information Box",

            KnownBox::Mvex => "Movie Extends Box",
            KnownBox::Mehd => "Movie Extends Header Box",
            KnownBox::Trex => "Track Extends Box",
            KnownBox::Mfhd => "Movie Fragment Header Box",
            KnownBox::Traf => "Track Fragment Box",
            KnownBox::Trun => "Track Fragment Run Box",
            KnownBox::Tfra => "Track Fragment Random Access Box",
            KnownBox::Mfro => "Movie Fragment Random Access Offset Box",

            KnownBox::Unknown(_) => "Unknown Box",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, KnownBox::Unknown(_))
    }
}

/// Classification lookup used by the walker. Unknown tags are leaves.
pub fn is_container(typ: FourCC) -> bool {
    KnownBox::from(typ).is_container()
}
