/*
 * @Date         : 2026-10-19
 * @Description  : WGAN 训练器：持有两个网络、两个优化器、随机数发生器、epoch 计数与损失历史，
 *                 按"判别器一步 → 生成器一步"的顺序交替更新
 *
 * 梯度流控制：
 * - 判别器步：fake 样本由`Generator::forward_detached()`产生，梯度到此为止，生成器不受影响
 * - 生成器步：梯度以`GradMode::InputOnly`穿过判别器，不写入判别器的任何参数梯度
 */

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Discriminator, Generator, LossHistory, SAMPLE_DIM, TrainingConfig};
use crate::checkpoint::{CheckpointError, CheckpointManager, CheckpointState};
use crate::data::DataSource;
use crate::errors::WganError;
use crate::nn::{GradMode, Module, NnError, Optimizer, RMSprop, RMSpropState};
use crate::tensor::Tensor;

/// 训练器当前所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingPhase {
    Idle,
    DiscriminatorStep,
    GeneratorStep,
    EpochComplete,
}

#[derive(Debug, Clone)]
pub struct Trainer {
    generator: Generator,
    discriminator: Discriminator,
    optimizer_g: RMSprop,
    optimizer_d: RMSprop,
    config: TrainingConfig,
    rng: StdRng,
    epochs: u64,
    losses: LossHistory,
    phase: TrainingPhase,
}

impl Trainer {
    /// 按配置新建网络与优化器。`config.seed`为空时使用系统熵
    pub fn new(config: TrainingConfig) -> Result<Self, WganError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = Generator::new(&mut rng);
        let discriminator = Discriminator::new(&mut rng)?;
        let optimizer_g = RMSprop::new(
            config.learning_rate,
            config.rmsprop_alpha,
            config.rmsprop_epsilon,
        )?;
        let optimizer_d = optimizer_g.clone();

        Ok(Self {
            generator,
            discriminator,
            optimizer_g,
            optimizer_d,
            config,
            rng,
            epochs: 0,
            losses: LossHistory::new(),
            phase: TrainingPhase::Idle,
        })
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// 已完成的 epoch 数
    pub const fn epochs(&self) -> u64 {
        self.epochs
    }

    pub fn losses(&self) -> &LossHistory {
        &self.losses
    }

    pub const fn phase(&self) -> TrainingPhase {
        self.phase
    }

    pub fn optimizer_g_state(&self) -> RMSpropState {
        self.optimizer_g.state_dict()
    }

    pub fn optimizer_d_state(&self) -> RMSpropState {
        self.optimizer_d.state_dict()
    }

    /// 训练`num_epochs`个 epoch，每个 epoch 结束后保存一次检查点
    pub fn train<S: DataSource + ?Sized>(
        &mut self,
        source: &S,
        num_epochs: usize,
        checkpoints: &CheckpointManager,
    ) -> Result<(), WganError> {
        tracing::info!(
            num_epochs,
            start_epoch = self.epochs,
            batches_per_epoch = ?source.len_hint(),
            "开始训练"
        );
        for _ in 0..num_epochs {
            self.train_epoch(source)?;
            checkpoints.save(self)?;
        }
        self.phase = TrainingPhase::Idle;
        Ok(())
    }

    /// 完整遍历一次数据源并令 epoch 计数加一，返回本轮的批次数。
    /// 空数据源是合法的：不产生任何损失记录，epoch 照常推进
    pub fn train_epoch<S: DataSource + ?Sized>(&mut self, source: &S) -> Result<usize, NnError> {
        let mut num_batches = 0;
        for (real, _) in source.batches() {
            self.train_batch(&real)?;
            num_batches += 1;
        }

        self.phase = TrainingPhase::EpochComplete;
        self.epochs += 1;
        match self.losses.tail_mean(num_batches) {
            Some((d_loss, g_loss)) => tracing::info!(
                epoch = self.epochs,
                batches = num_batches,
                d_loss,
                g_loss,
                "epoch 完成"
            ),
            None => tracing::info!(epoch = self.epochs, batches = 0, "epoch 完成（无数据）"),
        }
        Ok(num_batches)
    }

    /// 用一个真实样本批次 [B, 784] 依次执行判别器步与生成器步，
    /// 记录并返回`(d_loss, g_loss)`
    pub fn train_batch(&mut self, real: &Tensor) -> Result<(f32, f32), NnError> {
        let shape = real.shape();
        if shape.len() != 2 || shape[0] == 0 || shape[1] != SAMPLE_DIM {
            return Err(NnError::InputShape {
                layer: "real_batch".to_string(),
                expected: SAMPLE_DIM,
                got: shape.to_vec(),
            });
        }
        let batch_size = shape[0];

        let d_loss = self.discriminator_step(real)?;
        let g_loss = self.generator_step(batch_size)?;

        if !d_loss.is_finite() || !g_loss.is_finite() {
            tracing::warn!(
                epoch = self.epochs,
                batch = self.losses.len(),
                d_loss,
                g_loss,
                "损失出现非有限值"
            );
        }
        self.losses.push(d_loss, g_loss);
        tracing::debug!(batch = self.losses.len(), d_loss, g_loss, "batch 完成");
        Ok((d_loss, g_loss))
    }

    /// 判别器步：最大化`mean(D(real)) - mean(D(fake))`，即最小化其相反数
    pub fn discriminator_step(&mut self, real: &Tensor) -> Result<f32, NnError> {
        self.phase = TrainingPhase::DiscriminatorStep;
        let batch_size = real.shape().first().copied().unwrap_or(0);

        self.discriminator.zero_grad();
        let (real_scores, real_tape) = self.discriminator.forward(real)?;

        // fake 样本只是一个值，生成器的梯度不会被触碰
        let z = Generator::sample_latent(batch_size, &mut self.rng);
        let fake = self.generator.forward_detached(&z)?;
        let (fake_scores, fake_tape) = self.discriminator.forward(&fake)?;

        let loss = -(real_scores.mean()? - fake_scores.mean()?);

        // ∂loss/∂D(real)_i = -1/B，∂loss/∂D(fake)_i = +1/B
        let scale = 1.0 / batch_size as f32;
        self.discriminator.backward(
            &real_tape,
            &Tensor::full(-scale, real_scores.shape()),
            GradMode::Accumulate,
        )?;
        self.discriminator.backward(
            &fake_tape,
            &Tensor::full(scale, fake_scores.shape()),
            GradMode::Accumulate,
        )?;
        self.optimizer_d.step(&mut self.discriminator)?;

        let lipschitz = self.config.lipschitz;
        if lipschitz.enforce {
            let (low, high) = lipschitz.clip_range;
            self.discriminator.clamp_parameters(low, high);
        }
        Ok(loss)
    }

    /// 生成器步：最小化`-mean(D(G(z)))`，使用刚更新过的判别器
    pub fn generator_step(&mut self, batch_size: usize) -> Result<f32, NnError> {
        self.phase = TrainingPhase::GeneratorStep;

        self.generator.zero_grad();
        let z = Generator::sample_latent(batch_size, &mut self.rng);
        let (fake, g_tape) = self.generator.forward(&z)?;
        let (scores, d_tape) = self.discriminator.forward(&fake)?;

        let loss = -scores.mean()?;

        let grad_scores = Tensor::full(-1.0 / batch_size as f32, scores.shape());
        let grad_fake = self
            .discriminator
            .backward(&d_tape, &grad_scores, GradMode::InputOnly)?;
        self.generator
            .backward(&g_tape, &grad_fake, GradMode::Accumulate)?;
        self.optimizer_g.step(&mut self.generator)?;
        Ok(loss)
    }

    /// 导出完整训练状态（网络参数、优化器内部统计量、epoch 计数、损失历史）
    pub fn checkpoint_state(&self) -> CheckpointState {
        CheckpointState {
            generator: self.generator.state_dict(),
            discriminator: self.discriminator.state_dict(),
            optimizer_g: self.optimizer_g.state_dict(),
            optimizer_d: self.optimizer_d.state_dict(),
            epochs: self.epochs,
            losses: self.losses.clone(),
            source: None,
        }
    }

    /// 用检查点原地替换训练状态。任何参数名或形状不符都视为检查点损坏，
    /// 此时训练器保持原样
    pub fn apply_checkpoint(&mut self, state: CheckpointState) -> Result<(), CheckpointError> {
        let CheckpointState {
            generator: generator_state,
            discriminator: discriminator_state,
            optimizer_g: optimizer_g_state,
            optimizer_d: optimizer_d_state,
            epochs,
            losses,
            source,
        } = state;
        let path = source.unwrap_or_default();
        let corrupt = |e: NnError| CheckpointError::corrupt(&path, e);

        let mut generator = self.generator.clone();
        generator
            .load_state_dict(&generator_state)
            .map_err(corrupt)?;
        let mut discriminator = self.discriminator.clone();
        discriminator
            .load_state_dict(&discriminator_state)
            .map_err(corrupt)?;
        let mut optimizer_g = self.optimizer_g.clone();
        optimizer_g
            .load_state_dict(optimizer_g_state, &generator)
            .map_err(corrupt)?;
        let mut optimizer_d = self.optimizer_d.clone();
        optimizer_d
            .load_state_dict(optimizer_d_state, &discriminator)
            .map_err(corrupt)?;

        self.generator = generator;
        self.discriminator = discriminator;
        self.optimizer_g = optimizer_g;
        self.optimizer_d = optimizer_d;
        self.epochs = epochs;
        self.losses = losses;
        self.phase = TrainingPhase::Idle;
        Ok(())
    }
}
