// Licensed under the Apache-2.0 license

//! Enumerated protocol domains.
//!
//! Numeric values follow the HAB (High Assurance Boot) command set and must
//! match the boot ROM bit for bit.

use super::domain::hab_enum;

hab_enum! {
    /// Command tags carried in byte 0 of every command header.
    pub enum CmdTag("tag") {
        Set = 0xB1 => "SET",
        Unlock = 0xB2 => "UNLK",
        Initialize = 0xB4 => "INIT",
        InstallKey = 0xBE => "INS_KEY",
        Nop = 0xC0 => "NOP",
        AuthData = 0xCA => "AUT_DAT",
        WriteData = 0xCC => "WRT_DAT",
        CheckData = 0xCF => "CHK_DAT",
    }
}

hab_enum! {
    /// Access width of write/check data commands.
    pub enum ByteWidth("byte width") {
        Bytes1 = 1 => "BYTES_1",
        Bytes2 = 2 => "BYTES_2",
        Bytes4 = 4 => "BYTES_4",
    }
}

hab_enum! {
    /// Write data operations.
    pub enum WriteOp("write operation") {
        WriteValue = 0 => "WRITE_VALUE",
        /// Masked write of value.
        WriteValue1 = 1 => "WRITE_VALUE1",
        ClearBitmask = 2 => "CLEAR_BITMASK",
        SetBitmask = 3 => "SET_BITMASK",
    }
}

hab_enum! {
    /// Check data operations.
    pub enum CheckOp("check operation") {
        AllClear = 0 => "ALL_CLEAR",
        AllSet = 1 => "ALL_SET",
        AnyClear = 2 => "ANY_CLEAR",
        AnySet = 3 => "ANY_SET",
    }
}

hab_enum! {
    /// Algorithm types.
    pub enum Algorithm("algorithm") {
        Any = 0x00 => "HAB_ALG_ANY",
        Hash = 0x01 => "HAB_ALG_HASH",
        Sig = 0x02 => "HAB_ALG_SIG",
        F = 0x03 => "HAB_ALG_F",
        Ec = 0x04 => "HAB_ALG_EC",
        Cipher = 0x05 => "HAB_ALG_CIPHER",
        Mode = 0x06 => "HAB_ALG_MODE",
        Wrap = 0x07 => "HAB_ALG_WRAP",
        Sha1 = 0x11 => "HAB_ALG_SHA1",
        Sha256 = 0x17 => "HAB_ALG_SHA256",
        Sha512 = 0x1B => "HAB_ALG_SHA512",
        Pkcs1 = 0x21 => "HAB_ALG_PKCS1",
        Aes = 0x55 => "HAB_ALG_AES",
        Ccm = 0x66 => "HAB_MODE_CCM",
        Blob = 0x71 => "HAB_ALG_BLOB",
    }
}

hab_enum! {
    /// Protocol tags.
    pub enum Protocol("protocol") {
        /// SRK certificate format.
        Srk = 0x03 => "HAB_PCL_SRK",
        /// X.509v3 certificate format.
        X509 = 0x09 => "HAB_PCL_X509",
        /// Proprietary AEAD MAC format.
        Aead = 0xA3 => "HAB_PCL_AEAD",
        /// SHW-specific wrapped key format.
        Blob = 0xBB => "HAB_PCL_BLOB",
        /// CMS/PKCS#7 signature format.
        Cms = 0xC5 => "HAB_PCL_CMS",
    }
}

hab_enum! {
    /// Engine plugin tags.
    pub enum Engine("engine") {
        Any = 0x00 => "HAB_ENG_ANY",
        Scc = 0x03 => "HAB_ENG_SCC",
        Rtic = 0x05 => "HAB_ENG_RTIC",
        Sahara = 0x06 => "HAB_ENG_SAHARA",
        Csu = 0x0A => "HAB_ENG_CSU",
        Srtc = 0x0C => "HAB_ENG_SRTC",
        Dcp = 0x1B => "HAB_ENG_DCP",
        Caam = 0x1D => "HAB_ENG_CAAM",
        Snvs = 0x1E => "HAB_ENG_SNVS",
        Ocotp = 0x21 => "HAB_ENG_OCOTP",
        Dtcp = 0x22 => "HAB_ENG_DTCP",
        Hdcp = 0x24 => "HAB_ENG_HDCP",
        Rom = 0x36 => "HAB_ENG_ROM",
        Sw = 0xFF => "HAB_ENG_SW",
    }
}

hab_enum! {
    /// Configuration items addressed by the set command.
    pub enum ConfigItem("config item") {
        /// Manufacturing ID fuse selection.
        Mid = 0x01 => "HAB_VAR_CFG_ITM_MID",
        /// Engine configuration.
        Eng = 0x03 => "HAB_VAR_CFG_ITM_ENG",
    }
}

hab_enum! {
    /// Install key flags. Combined as a bitmask in `InsKeyFlags`.
    pub enum InsKeyFlag("install key flag") {
        Clr = 0 => "HAB_CMD_INS_KEY_CLR",
        Abs = 1 => "HAB_CMD_INS_KEY_ABS",
        Csf = 2 => "HAB_CMD_INS_KEY_CSF",
        Dat = 4 => "HAB_CMD_INS_KEY_DAT",
        Cfg = 8 => "HAB_CMD_INS_KEY_CFG",
        Fid = 16 => "HAB_CMD_INS_KEY_FID",
        Mid = 32 => "HAB_CMD_INS_KEY_MID",
        Cid = 64 => "HAB_CMD_INS_KEY_CID",
        Hsh = 128 => "HAB_CMD_INS_KEY_HSH",
    }
}

hab_enum! {
    /// Authenticate data flags.
    pub enum AuthFlag("auth data flag") {
        Clr = 0 => "HAB_CMD_AUT_DAT_CLR",
        Abs = 1 => "HAB_CMD_AUT_DAT_ABS",
    }
}
